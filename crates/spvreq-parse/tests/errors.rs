use spvreq_parse::parse_str;

fn err(src: &str) -> String {
    parse_str("<mem>", src).unwrap_err().to_string()
}

#[test]
fn unknown_opcode_reports_line() {
    let e = err("OpNop\nOpFrobnicate 1\n");
    assert!(e.contains("line 2"), "{e}");
    assert!(e.contains("unknown opcode 'OpFrobnicate'"), "{e}");
}

#[test]
fn missing_equals_after_result() {
    assert!(err("%x OpTypeBool").contains("expected '='"));
}

#[test]
fn duplicate_definition_is_rejected() {
    assert!(err("%x = OpTypeBool\n%x = OpTypeVoid\n").contains("defined more than once"));
}

#[test]
fn unterminated_function() {
    let e = err("%f = OpFunction %v 0 %t\nOpReturn\n");
    assert!(e.contains("missing OpFunctionEnd"), "{e}");
}

#[test]
fn stray_function_end() {
    assert!(err("OpFunctionEnd").contains("without OpFunction"));
}

#[test]
fn nested_function() {
    let e = err("%f = OpFunction %v 0 %t\n%g = OpFunction %v 0 %t\n");
    assert!(e.contains("inside function 'f'"), "{e}");
}

#[test]
fn malformed_literal() {
    assert!(err("OpTypeInt 12x 0").contains("invalid integer literal"));
}

/// `%vN = OpTypeInt 32 0` lines filling roughly `bytes` of source.
fn int_types(bytes: usize) -> (String, usize) {
    let mut src = String::with_capacity(bytes + 64);
    let mut n = 0;
    while src.len() < bytes {
        src.push_str(&format!("%v{n} = OpTypeInt 32 0\n"));
        n += 1;
    }
    (src, n)
}

#[test]
fn megabyte_listing_reports_its_last_line() {
    let (mut src, n) = int_types(990_000);
    let module = parse_str("<mem>", &src).expect("parse large listing");
    assert_eq!(module.units[0].insts.len(), n);

    src.push_str("; trailing note\nOpBogus 1\n");
    let e = err(&src);
    assert!(e.contains(&format!("line {}: unknown opcode 'OpBogus'", n + 2)), "{e}");
}

#[test]
fn error_line_counts_comment_and_blank_lines() {
    let e = err("; header\n\nOpNop // ok\n\n%x = OpTypeBool 1 2 \"unterminated\n");
    assert!(e.contains("line 5: unterminated string"), "{e}");
}

#[test]
fn stray_non_ascii_character_is_shown_whole() {
    let e = err("OpNop é\n");
    assert!(e.contains("line 1: unexpected character 'é'"), "{e}");
}
