use super::*;

#[test]
fn icon_is_svg_data_url() {
    let url = icon_data_url();
    assert!(url.starts_with("data:image/svg+xml;base64,"));
    let encoded = url.trim_start_matches("data:image/svg+xml;base64,");
    let decoded = STANDARD.decode(encoded).unwrap();
    assert!(String::from_utf8(decoded).unwrap().contains("<svg"));
}
