use crate::domain::{websites_match, EvidenceBlock, KnowledgeProfile};

use super::{rephrase_search, HttpError, SearchProvider};

/// Decides which evidence reaches the prompt, and in which order.
///
/// A knowledge profile is only trusted when the website it declares is the
/// website on the row. A trusted profile goes first. Otherwise the website
/// text goes first and a second, rephrased search gets one chance to produce
/// a profile that passes the same check.
pub async fn select_evidence(
    search: &dyn SearchProvider,
    company_name: &str,
    website: &str,
    knowledge: Option<KnowledgeProfile>,
    website_text: Option<String>,
) -> Result<Vec<EvidenceBlock>, HttpError> {
    let mut evidence = vec![];

    if let Some(profile) = knowledge {
        if websites_match(profile.website(), website) {
            log::info!("Knowledge panel for {} matches {}", company_name, website);
            evidence.push(EvidenceBlock::GoogleSearch(profile));
            evidence.extend(website_text.map(EvidenceBlock::Website));
            return Ok(evidence);
        }

        log::info!(
            "Knowledge panel for {} declares {:?}, expected {}",
            company_name,
            profile.website(),
            website
        );
    }

    evidence.extend(website_text.map(EvidenceBlock::Website));

    match rephrase_search(search, company_name, website).await? {
        Some(candidate) if websites_match(candidate.website(), website) => {
            evidence.push(EvidenceBlock::GoogleSearch(candidate));
        }
        Some(_) => log::info!("Rephrased panel for {} does not match, dropped", company_name),
        None => {}
    }

    Ok(evidence)
}
