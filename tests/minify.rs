fn minify(s: &str) -> String {
    let mut bytes = s.as_bytes().to_vec();
    jsontree::minify_in_place(&mut bytes);
    String::from_utf8(bytes).unwrap()
}

#[test]
fn strips_comments_and_whitespace_then_still_parses() {
    let commented = r#"
        {
            // this is the config
            "retries": 3, /* inline note */
            "host": "example.com"
        }
    "#;
    let minified = minify(commented);
    assert_eq!(minified, r#"{"retries":3,"host":"example.com"}"#);

    let value = jsontree::parse(minified.as_bytes()).unwrap();
    assert_eq!(value.as_object().unwrap().get("retries").unwrap().as_i32(), Some(3));
}

#[test]
fn minifying_twice_is_a_fixpoint() {
    let input = r#"{"a":1,"b":[1,2,3],"c":"has // no comment"}"#;
    let once = minify(input);
    let twice = minify(&once);
    assert_eq!(once, twice);
    assert_eq!(once, input);
}
