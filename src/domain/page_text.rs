use scraper::{Html, Selector};

/// Visible text of a page with navigation, header/footer and script/style removed.
pub fn extract_visible_text(html: &str) -> String {
    let mut document = Html::parse_document(html);

    for selector in [
        r#"header, footer"#,
        r#"[id*="navigation"]"#,
        r#"script, style"#,
    ] {
        remove_matching(&mut document, &Selector::parse(selector).unwrap());
    }

    document
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

fn remove_matching(document: &mut Html, selector: &Selector) {
    let ids: Vec<_> = document.select(selector).map(|el| el.id()).collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::extract_visible_text;

    #[test]
    fn strips_chrome_and_scripts() {
        let html = r#"
            <html>
              <head><style>body { color: red; }</style></head>
              <body>
                <header>Top banner</header>
                <div id="main-navigation">Home | About</div>
                <p>Acme builds rockets.</p>
                <script>console.log("tracking")</script>
                <footer>Copyright</footer>
              </body>
            </html>
        "#;

        let text = extract_visible_text(html);

        assert!(text.contains("Acme builds rockets."));
        assert!(!text.contains("Top banner"));
        assert!(!text.contains("Home | About"));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn nested_removals_do_not_panic() {
        let html = concat!(
            r#"<header><nav id="navigation"><script>x()</script>Menu</nav></header>"#,
            "<p>Body</p>"
        );

        assert_eq!(extract_visible_text(html), "Body");
    }

    #[test]
    fn malformed_html_keeps_recoverable_text() {
        let html = "<div><p>Unclosed paragraph <b>bold";

        assert_eq!(extract_visible_text(html), "Unclosed paragraph bold");
    }
}
