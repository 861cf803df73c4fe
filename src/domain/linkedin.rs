use scraper::{Html, Selector};

const EMPLOYEES_PREFIX: &str = "View all ";
const EMPLOYEES_SUFFIX: &str = " employees";

/// Fields scraped from a LinkedIn company page. A field is `Some` when its
/// element exists on the page, even if the element is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedInProfile {
    pub name: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    /// Extracted, never rendered into the summary sentence.
    pub employee_count: Option<String>,
    pub nationality: Option<String>,
    pub headquarters: Option<String>,
    pub organization_type: Option<String>,
    pub specialties: Option<String>,
    pub address: Option<String>,
    pub tagline: Option<String>,
    pub about: Option<String>,
    pub founded: Option<String>,
}

impl LinkedInProfile {
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        let text_of = |selector: &str| select_text(&document, selector);

        let employee_count =
            text_of(r#"a[data-tracking-control-name="org-employees_cta_face-pile-cta"]"#).map(
                |text| {
                    let text = text.strip_prefix(EMPLOYEES_PREFIX).unwrap_or(&text);
                    text.strip_suffix(EMPLOYEES_SUFFIX).unwrap_or(text).to_string()
                },
            );

        let address = text_of("#address-0 p");
        let nationality = address
            .as_ref()
            .and_then(|a| a.split(", ").last().map(|part| part.to_string()));

        LinkedInProfile {
            name: text_of("h1"),
            website: text_of(r#"div[data-test-id="about-us__website"] a"#),
            industry: text_of(r#"div[data-test-id="about-us__industries"] dd"#),
            company_size: text_of(r#"div[data-test-id="about-us__size"] dd"#),
            employee_count,
            nationality,
            headquarters: text_of(r#"div[data-test-id="about-us__headquarters"] dd"#),
            organization_type: text_of(r#"div[data-test-id="about-us__organizationType"] dd"#),
            specialties: text_of(r#"div[data-test-id="about-us__specialties"] dd"#),
            address,
            tagline: text_of("h4"),
            about: text_of(r#"p[data-test-id="about-us__description"]"#),
            founded: text_of(r#"div[data-test-id="about-us__foundedOn"] dd"#),
        }
    }

    pub fn to_sentence(&self) -> String {
        let parts: [(&Option<String>, &str, &str); 12] = [
            (&self.name, "The company name is ", ". "),
            (&self.website, "The company's website is ", ". "),
            (&self.industry, "The company's industry is ", ". "),
            (&self.company_size, "The company has between ", ". "),
            (&self.nationality, "The company's nationality is ", ". "),
            (&self.headquarters, "The company is headquartered in ", ". "),
            (&self.organization_type, "The company type is ", ". "),
            (&self.specialties, "The company's speciality is ", ". "),
            (&self.address, "The company's address is ", ". "),
            (&self.tagline, "The company's role is ", ". "),
            (&self.about, "Here's an overview of the company. ", ". "),
            (&self.founded, "The company was founded in ", ". "),
        ];

        parts
            .iter()
            .filter_map(|(value, prefix, suffix)| match value {
                Some(v) if !v.is_empty() => Some(format!("{}{}{}", prefix, v, suffix)),
                _ => None,
            })
            .collect()
    }
}

/// Text of every match concatenated and trimmed, `None` when nothing matches.
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    let mut matches = document.select(&selector).peekable();
    matches.peek()?;

    let text: String = matches.flat_map(|el| el.text()).collect();
    Some(text.trim().to_string())
}
