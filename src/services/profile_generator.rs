use std::sync::Arc;

use anyhow::{anyhow, Context};

use crate::{
    configuration::PipelineVariant,
    domain::{
        collapse_whitespace, linkedin_instructions, linkedin_preamble, search_instructions,
        search_preamble, EvidenceBlock, PromptMessages, Row,
    },
};

use super::{
    fetch_page_text, fetch_site_text, find_linkedin_url, lookup_knowledge, select_evidence,
    CompletionProvider, LinkedinScraper, PageFetcher, SearchProvider,
};

/// Everything one row needs to go from a company name to a written profile.
pub struct ProfileGenerator {
    pub variant: PipelineVariant,
    pub model: String,
    pub search: Arc<dyn SearchProvider>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub completion: Arc<dyn CompletionProvider>,
    pub linkedin: Option<LinkedinScraper>,
}

impl ProfileGenerator {
    pub async fn generate(&self, row: &Row, prompt_template: &str) -> anyhow::Result<String> {
        let messages = match self.variant {
            PipelineVariant::Search => self.search_prompt(row, prompt_template).await?,
            PipelineVariant::Linkedin => self.linkedin_prompt(row, prompt_template).await?,
        };

        log::info!(
            "Row {}: sending {} messages for {}",
            row.row_index,
            messages.len(),
            row.company_name
        );

        self.completion.complete(&self.model, &messages).await
    }

    /// Knowledge panel and website text, reconciled by website.
    pub async fn search_prompt(
        &self,
        row: &Row,
        prompt_template: &str,
    ) -> anyhow::Result<PromptMessages> {
        let knowledge = lookup_knowledge(self.search.as_ref(), &row.company_name)
            .await
            .with_context(|| format!("Searching for {}", row.company_name))?;
        let website_text = fetch_site_text(self.fetcher.as_ref(), &row.website).await;

        let evidence = select_evidence(
            self.search.as_ref(),
            &row.company_name,
            &row.website,
            knowledge,
            website_text,
        )
        .await
        .with_context(|| format!("Rephrased search for {}", row.company_name))?;

        Ok(PromptMessages::assemble(
            search_preamble(&row.company_name, &row.website),
            &evidence,
            search_instructions(prompt_template),
        ))
    }

    /// LinkedIn page first, then the website the page links to.
    pub async fn linkedin_prompt(
        &self,
        row: &Row,
        prompt_template: &str,
    ) -> anyhow::Result<PromptMessages> {
        let scraper = self
            .linkedin
            .as_ref()
            .ok_or_else(|| anyhow!("LinkedIn scraper is not configured"))?;

        let linkedin_url =
            find_linkedin_url(self.search.as_ref(), &row.company_name, &row.website)
                .await
                .with_context(|| format!("Looking up LinkedIn page of {}", row.company_name))?
                .ok_or_else(|| anyhow!("No LinkedIn result for {}", row.company_name))?;
        log::info!("Row {}: LinkedIn page {}", row.row_index, linkedin_url);

        let (profile, sentence) = scraper
            .create_linkedin_sentence(&linkedin_url)
            .await
            .unwrap_or_default();

        let company_name = profile
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| row.company_name.clone());
        let website = profile
            .website
            .filter(|w| !w.is_empty())
            .unwrap_or_else(|| row.website.clone());

        let mut evidence = vec![];
        let sentence = collapse_whitespace(&sentence);
        if !sentence.is_empty() {
            evidence.push(EvidenceBlock::LinkedIn(sentence));
        }
        if let Some(text) = fetch_page_text(self.fetcher.as_ref(), &website).await {
            evidence.push(EvidenceBlock::OfficialWebsite(text));
        }

        Ok(PromptMessages::assemble(
            linkedin_preamble(&company_name),
            &evidence,
            linkedin_instructions(prompt_template),
        ))
    }
}
