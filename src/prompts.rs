//! The fixed instruction sent alongside every scan image.
//!
//! Centralising the prompt keeps the required output contract in one place:
//! the layout engine in [`crate::pipeline::layout`] depends on the model
//! producing `##` headings and `- **Label:**` bullets, and unit tests can
//! assert the contract without a live model call.

/// Radiologist instruction template for the multimodal request.
///
/// The four numbered sections and their order are load-bearing: downstream
/// consumers of the PDF expect Scan Type & Region, Key Findings, Diagnosis,
/// and Recommendations to appear as `##` headings in exactly this sequence.
/// Rules 2 and 3 exist because some models collapse several bullet findings
/// onto one physical line; the layout stage repairs that anyway, but asking
/// first reduces how often the repair is needed.
pub const ANALYSIS_PROMPT: &str = r#"You are an expert Radiologist. Analyze the image.

FORMATTING RULES:
1. Use clear headings with '##'.
2. Put every single bullet point on a NEW LINE.
3. Do not combine multiple findings into one line.

REQUIRED OUTPUT FORMAT:

## 1. Scan Type & Region
- **Modality:** [Modality Name]
- **Region:** [Region Name]
- **View:** [View Name]

## 2. Key Findings
- **Finding 1:** [Detail]
- **Finding 2:** [Detail]

## 3. Diagnosis
- **Primary:** [Diagnosis]
- **Confidence:** [Level]

## 4. Recommendations
- [Recommendation 1]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_all_four_sections_in_order() {
        let scan = ANALYSIS_PROMPT.find("## 1. Scan Type & Region").unwrap();
        let findings = ANALYSIS_PROMPT.find("## 2. Key Findings").unwrap();
        let diagnosis = ANALYSIS_PROMPT.find("## 3. Diagnosis").unwrap();
        let recs = ANALYSIS_PROMPT.find("## 4. Recommendations").unwrap();
        assert!(scan < findings && findings < diagnosis && diagnosis < recs);
    }

    #[test]
    fn prompt_demands_one_bullet_per_line() {
        assert!(ANALYSIS_PROMPT.contains("NEW LINE"));
    }
}
