//! Basic tests for libxslt-adapter

use libxslt_adapter::{
    ErrorKind, ExtendedXsltEngine, LibxsltEngine, ParameterList, XsltEngine,
};

const SIMPLE_XML: &str = r#"<?xml version="1.0"?>
<root>
    <item id="1">First</item>
    <item id="2">Second</item>
    <item id="3">Third</item>
</root>"#;

const IDENTITY_XSL: &str = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
    <xsl:output method="xml" omit-xml-declaration="yes"/>
    <xsl:template match="@*|node()">
        <xsl:copy>
            <xsl:apply-templates select="@*|node()"/>
        </xsl:copy>
    </xsl:template>
</xsl:stylesheet>"#;

const ITEMS_XSL: &str = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
    <xsl:output method="text"/>
    <xsl:template match="/">
        <xsl:for-each select="//item">
            <xsl:value-of select="."/>
            <xsl:if test="position() != last()">,</xsl:if>
        </xsl:for-each>
    </xsl:template>
</xsl:stylesheet>"#;

const PARAM_XSL: &str = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
    <xsl:output method="text"/>
    <xsl:param name="who" select="'nobody'"/>
    <xsl:param name="n" select="0"/>
    <xsl:template match="/">
        <xsl:value-of select="concat($who, ':', $n)"/>
    </xsl:template>
</xsl:stylesheet>"#;

fn engine() -> &'static LibxsltEngine {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    LibxsltEngine::initialize()
}

#[test]
fn test_identity_transform() {
    let engine = engine();
    let style = engine.compile(IDENTITY_XSL).unwrap();
    let out = engine.apply_plain(&style, "<root>Hello</root>").unwrap();
    let text = out.to_utf8().unwrap();
    assert_eq!(text.trim_end(), "<root>Hello</root>");
}

#[test]
fn test_identity_keeps_attributes() {
    let engine = engine();
    let style = engine.compile(IDENTITY_XSL).unwrap();
    let out = engine.apply_plain(&style, SIMPLE_XML).unwrap().into_string();
    assert!(out.contains(r#"<item id="2">Second</item>"#));
}

#[test]
fn test_value_of_extracts_text() {
    let engine = engine();
    let style = engine.compile(ITEMS_XSL).unwrap();
    let out = engine.apply_plain(&style, SIMPLE_XML).unwrap();
    assert_eq!(out.as_bytes(), b"First,Second,Third");
}

#[test]
fn test_exslt_string_functions() {
    let engine = engine();
    let xsl = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0"
    xmlns:xsl="http://www.w3.org/1999/XSL/Transform"
    xmlns:str="http://exslt.org/strings"
    extension-element-prefixes="str">
    <xsl:output method="text"/>
    <xsl:template match="/">
        <xsl:value-of select="str:padding(3, '-')"/>
        <xsl:value-of select="count(str:tokenize('a,b,c', ','))"/>
    </xsl:template>
</xsl:stylesheet>"#;
    let out = engine
        .transform_string(xsl, "<doc/>", &ParameterList::new())
        .unwrap();
    assert_eq!(out.to_utf8(), Some("---3"));
}

#[test]
fn test_malformed_xml_is_parse_error() {
    let engine = engine();
    let style = engine.compile(IDENTITY_XSL).unwrap();
    let err = engine.apply_plain(&style, "<a><b></a>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_malformed_xsl_is_parse_error() {
    let engine = engine();
    let err = engine
        .compile(r#"<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">"#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_unknown_top_level_element_is_compile_error() {
    let engine = engine();
    let xsl = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
    <xsl:frobnicate/>
</xsl:stylesheet>"#;
    let err = engine.compile(xsl).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Compile);
}

#[test]
fn test_compile_error_carries_library_message() {
    let engine = engine();
    let xsl = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
    <xsl:frobnicate/>
</xsl:stylesheet>"#;
    let err = engine.compile(xsl).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("frobnicate"), "unexpected message: {message}");

    // The next failure reports only its own messages
    let err = engine.compile("<html><body/></html>").unwrap_err();
    assert!(!err.to_string().contains("frobnicate"));
}

#[test]
fn test_not_a_stylesheet_is_compile_error() {
    let engine = engine();
    let err = engine.compile("<html><body/></html>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Compile);
}

#[test]
fn test_empty_output_is_success() {
    let engine = engine();
    let xsl = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
    <xsl:output method="text"/>
    <xsl:template match="/"/>
</xsl:stylesheet>"#;
    let style = engine.compile(xsl).unwrap();
    let out = engine.apply_plain(&style, SIMPLE_XML).unwrap();
    assert!(out.is_empty());
    assert_eq!(out.len(), 0);
}

#[test]
fn test_string_and_expression_parameters() {
    let engine = engine();
    let style = engine.compile(PARAM_XSL).unwrap();

    let mut params = ParameterList::new();
    params.push_string("who", "it's me").push("n", "2 + 3");
    let out = engine.apply(&style, "<doc/>", &params).unwrap();
    assert_eq!(out.to_utf8(), Some("it's me:5"));
}

#[test]
fn test_unbound_parameters_keep_defaults() {
    let engine = engine();
    let style = engine.compile(PARAM_XSL).unwrap();
    let out = engine
        .transform_with_params(&style, "<doc/>", [("n", "7")])
        .unwrap();
    assert_eq!(out.to_utf8(), Some("nobody:7"));
}

#[test]
fn test_broken_parameter_expression_is_transform_error() {
    let engine = engine();
    let style = engine.compile(PARAM_XSL).unwrap();
    let err = engine
        .transform_with_params(&style, "<doc/>", [("n", "((")])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transform);
}

#[test]
fn test_parameter_with_nul_is_rejected() {
    let engine = engine();
    let style = engine.compile(PARAM_XSL).unwrap();
    let err = engine
        .transform_with_params(&style, "<doc/>", [("n\0", "1")])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[test]
fn test_sequential_reuse() {
    let engine = engine();
    let style = engine.compile(ITEMS_XSL).unwrap();

    let first = engine
        .apply_plain(&style, "<r><item>a</item></r>")
        .unwrap();
    let second = engine
        .apply_plain(&style, "<r><item>b</item><item>c</item></r>")
        .unwrap();
    let third = engine.apply_plain(&style, SIMPLE_XML).unwrap();
    style.release();

    assert_eq!(first.to_utf8(), Some("a"));
    assert_eq!(second.to_utf8(), Some("b,c"));
    assert_eq!(third.to_utf8(), Some("First,Second,Third"));
}

#[test]
fn test_errors_do_not_leak_into_next_call() {
    let engine = engine();
    let style = engine.compile(ITEMS_XSL).unwrap();
    assert!(engine.apply_plain(&style, "<a><b></a>").is_err());
    let out = engine.apply_plain(&style, "<r><item>ok</item></r>").unwrap();
    assert_eq!(out.to_utf8(), Some("ok"));
}

#[test]
fn test_concurrent_callers_are_serialized() {
    let engine = engine();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let style = engine.compile(ITEMS_XSL).unwrap();
                let xml = format!("<r><item>{i}</item></r>");
                let bad = engine.apply_plain(&style, "<broken>");
                let good = engine.apply_plain(&style, &xml).unwrap();
                (i, bad.is_err(), good.into_string())
            })
        })
        .collect();

    for handle in handles {
        let (i, bad_failed, good) = handle.join().unwrap();
        assert!(bad_failed);
        assert_eq!(good, i.to_string());
    }
}

#[test]
fn test_full_lifecycle_on_worker_thread_completes() {
    use std::sync::mpsc;
    use std::time::Duration;

    let engine = engine();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let style = engine.compile(ITEMS_XSL).unwrap();
        let out = engine.apply_plain(&style, SIMPLE_XML).unwrap().into_string();
        drop(style);
        let one_shot = engine
            .transform_string(ITEMS_XSL, "<r><item>x</item></r>", &ParameterList::new())
            .unwrap()
            .into_string();
        let again = engine.compile(IDENTITY_XSL).is_ok();
        let _ = tx.send((out, one_shot, again));
    });

    let (out, one_shot, again) = rx
        .recv_timeout(Duration::from_secs(10))
        .expect("engine calls did not complete");
    assert_eq!(out, "First,Second,Third");
    assert_eq!(one_shot, "x");
    assert!(again);
}

#[test]
fn test_output_metadata() {
    let engine = engine();
    let xsl = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
    <xsl:output method="html" encoding="ISO-8859-1"/>
    <xsl:template match="/"><p><xsl:value-of select="."/></p></xsl:template>
</xsl:stylesheet>"#;
    let style = engine.compile(xsl).unwrap();
    assert_eq!(style.output_method().as_deref(), Some("html"));
    assert_eq!(style.output_encoding().as_deref(), Some("ISO-8859-1"));

    let text_style = engine.compile(ITEMS_XSL).unwrap();
    assert_eq!(text_style.output_encoding(), None);
}

#[test]
fn test_output_uses_declared_encoding() {
    let engine = engine();
    let xsl = r#"<?xml version="1.0"?>
<xsl:stylesheet version="1.0" xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
    <xsl:output method="text" encoding="ISO-8859-1"/>
    <xsl:template match="/"><xsl:value-of select="/w"/></xsl:template>
</xsl:stylesheet>"#;
    let style = engine.compile(xsl).unwrap();
    let out = engine.apply_plain(&style, "<w>caf\u{e9}</w>").unwrap();
    assert_eq!(out.as_bytes(), b"caf\xe9");
}

#[test]
fn test_engine_reports_features() {
    let engine = engine();
    assert_eq!(engine.xslt_version(), "1.0");
    assert!(engine.supports_feature("EXSLT-STRINGS"));
    assert!(engine.engine_version() > 10100);
    assert!(LibxsltEngine::get().is_some());
}
