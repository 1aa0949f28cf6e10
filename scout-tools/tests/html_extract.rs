use scout_tools::extract_page_text;

#[test]
fn extracts_title_and_body_text() {
    let page = extract_page_text(
        r#"
<!DOCTYPE html>
<html lang="en">
<head><title>  Acme Co | About </title></head>
<body>
    <h1>About Acme</h1>
    <p>Acme Co was founded in <strong>2001</strong> in Springfield.</p>
</body>
</html>
"#,
    );

    assert_eq!(page.title.as_deref(), Some("Acme Co | About"));
    assert_eq!(
        page.text,
        "About Acme\nAcme Co was founded in 2001 in Springfield."
    );
}

#[test]
fn strips_scripts_styles_and_chrome() {
    let page = extract_page_text(
        r#"
<html>
<head><style>body { color: red; }</style><script>console.log("x")</script></head>
<body>
    <nav>Navigation menu</nav>
    <header>Header content</header>
    <p>Visible content</p>
    <script>alert("more js")</script>
    <noscript>Enable JS</noscript>
    <footer>Footer content</footer>
</body>
</html>
"#,
    );

    assert_eq!(page.text, "Visible content");
    assert!(page.title.is_none());
}

#[test]
fn tolerates_malformed_markup() {
    let page = extract_page_text(
        r#"
<html><body>
    <h1>Unclosed heading
    <p>Paragraph with <strong>unclosed bold and <a href="">nested anchor</a>
    <ul><li>First item<li>Second item</ul>
    <p>Recovery after malformed section</p>
</body></html>
"#,
    );

    for expected in [
        "Unclosed heading",
        "unclosed bold and nested anchor",
        "First item",
        "Second item",
        "Recovery after malformed section",
    ] {
        assert!(page.text.contains(expected), "missing {expected:?} in {:?}", page.text);
    }
}

#[test]
fn empty_document_yields_empty_text() {
    let page = extract_page_text("<html><body>   </body></html>");
    assert!(page.text.is_empty());
}
