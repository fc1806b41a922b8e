use rand::Rng;

use crate::{ProviderError, Reply, ResponseProvider};

pub const CITATIONS: [&str; 3] = [
    "Research Paper 1.pdf",
    "Document Analysis.pdf",
    "Study Results.pdf",
];

pub const TEMPLATE_COUNT: usize = 3;

/// Picks one of three fixed answers, each quoting the prompt verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedResponseProvider {
    fixed: Option<usize>,
}

impl CannedResponseProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answers with template `index` (modulo the template count).
    pub fn fixed(index: usize) -> Self {
        Self {
            fixed: Some(index % TEMPLATE_COUNT),
        }
    }

    fn pick(&self) -> usize {
        self.fixed
            .unwrap_or_else(|| rand::rng().random_range(0..TEMPLATE_COUNT))
    }
}

#[async_trait::async_trait]
impl ResponseProvider for CannedResponseProvider {
    async fn respond(&self, prompt: &str) -> Result<Reply, ProviderError> {
        Ok(Reply {
            text: render_template(self.pick(), prompt),
            citations: CITATIONS.iter().map(|c| c.to_string()).collect(),
        })
    }
}

pub fn render_template(index: usize, prompt: &str) -> String {
    match index % TEMPLATE_COUNT {
        0 => format!(
            "Based on the documents you've uploaded, I can see that \"{prompt}\" relates to several key concepts. Let me break this down for you:\n\
             \n\
             1. **Main findings**: The research indicates strong correlations between the variables you're asking about.\n\
             \n\
             2. **Methodology**: The studies used quantitative analysis with a sample size of over 1,000 participants.\n\
             \n\
             3. **Implications**: This has significant impact on future research directions in this field.\n\
             \n\
             Would you like me to elaborate on any of these points or provide more specific details from the source documents?"
        ),
        1 => format!(
            "Great question about \"{prompt}\"! From analyzing your uploaded documents, here's what I found:\n\
             \n\
             The authors discuss this concept extensively in Section 3.2, where they present evidence supporting the hypothesis. The key takeaways are:\n\
             \n\
             \u{2022} Statistical significance was achieved (p < 0.05)\n\
             \u{2022} Effect size was moderate to large (Cohen's d = 0.7)\n\
             \u{2022} Results were consistent across different demographic groups\n\
             \n\
             This aligns with previous research by Johnson et al. (2019) and contradicts some earlier findings by Smith (2017)."
        ),
        _ => format!(
            "Interesting inquiry about \"{prompt}\". Let me search through your documents...\n\
             \n\
             I found relevant information across 3 different papers in your collection. Here's a synthesized answer:\n\
             \n\
             **Definition**: The concept is defined as a multifaceted phenomenon with both theoretical and practical implications.\n\
             \n\
             **Evidence**: Multiple studies provide converging evidence, with meta-analyses showing consistent effect patterns.\n\
             \n\
             **Applications**: The findings have been successfully applied in clinical, educational, and organizational settings.\n\
             \n\
             The strongest evidence comes from the randomized controlled trials discussed in your uploaded research papers."
        ),
    }
}
