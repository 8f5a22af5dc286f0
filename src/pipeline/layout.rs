//! Layout planning: model text → ordered sequence of render operations.
//!
//! ## Why a separate planning stage?
//!
//! Model output is only *loosely* markdown: headings and bullets are usually
//! marked, but several bullet findings sometimes arrive collapsed onto one
//! physical line, bold markers appear inconsistently, and the text may contain
//! characters the builtin PDF fonts cannot show. This stage resolves all of
//! that deterministically and hands the PDF writer a flat list of
//! [`LayoutOp`]s, so the classification state machine is testable without
//! inspecting PDF bytes.
//!
//! ## Classification rules (order matters)
//!
//! Per line, after transliteration and trimming, the first match wins:
//!
//! 1. Starts with `#`  → [`LayoutOp::Heading`]; every `#` is stripped.
//! 2. Starts with `*` or `-` → [`LayoutOp::Bullet`]; leading markers and all
//!    `**` bold markers are stripped.
//! 3. Otherwise → [`LayoutOp::Paragraph`]; the text is kept verbatim — in
//!    particular `**` is NOT stripped from plain lines. The asymmetry with
//!    bullets is intentional and covered by a regression test.
//!
//! Empty lines (after trimming) are dropped. A line that is *only* markers
//! collapses to an empty heading or bullet; it still renders as an empty row
//! rather than being suppressed.

use once_cell::sync::Lazy;
use regex::Regex;

/// One renderable line of the diagnostic body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOp {
    /// Section heading: bold, enlarged, heading colour.
    Heading(String),
    /// Indented bullet row: glyph cell + wrapping text block.
    Bullet(String),
    /// Plain wrapping text block at the left margin.
    Paragraph(String),
}

/// Plan the diagnostic body: normalise, split, classify.
///
/// Total for any input text; never fails, never drops non-empty content.
pub fn lay_out(report_text: &str) -> Vec<LayoutOp> {
    normalize_bullet_runs(report_text)
        .split('\n')
        .filter_map(|raw| {
            let line = to_renderable(raw);
            let line = line.trim();
            if line.is_empty() {
                None
            } else {
                Some(classify_line(line))
            }
        })
        .collect()
}

// ── Bullet-run repair ────────────────────────────────────────────────────

static RE_INLINE_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\n])([*-] \*\*)").unwrap());

/// Insert a newline before every `* **` / `- **` that is not already at line
/// start, splitting bullet findings the model collapsed onto one line.
pub fn normalize_bullet_runs(text: &str) -> String {
    RE_INLINE_BULLET.replace_all(text, "$1\n$2").to_string()
}

// ── Encoding fallback ────────────────────────────────────────────────────

/// Replace characters outside the builtin fonts' Latin-1 repertoire with `?`.
///
/// The response is opaque text and may contain emoji, CJK, or control
/// characters; rendering must degrade per character, never abort.
pub fn to_renderable(line: &str) -> String {
    line.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

// ── Line classification ──────────────────────────────────────────────────

/// Classify one trimmed, non-empty line. Heading wins over bullet.
pub fn classify_line(line: &str) -> LayoutOp {
    if line.starts_with('#') {
        LayoutOp::Heading(line.replace('#', "").trim().to_string())
    } else if line.starts_with('*') || line.starts_with('-') {
        let stripped = line
            .trim_start_matches(['*', '-'])
            .trim()
            .replace("**", "");
        LayoutOp::Bullet(stripped.trim().to_string())
    } else {
        LayoutOp::Paragraph(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_strips_all_hashes() {
        assert_eq!(
            classify_line("## 1. Scan Type & Region"),
            LayoutOp::Heading("1. Scan Type & Region".into())
        );
    }

    #[test]
    fn heading_wins_over_bullet_content() {
        // A heading line containing bullet characters later is still a heading.
        assert_eq!(
            classify_line("## Findings - preliminary"),
            LayoutOp::Heading("Findings - preliminary".into())
        );
    }

    #[test]
    fn bullet_strips_markers_and_bold() {
        assert_eq!(
            classify_line("- **Modality:** CT"),
            LayoutOp::Bullet("Modality: CT".into())
        );
        assert_eq!(
            classify_line("* **Region:** Chest"),
            LayoutOp::Bullet("Region: Chest".into())
        );
    }

    #[test]
    fn plain_keeps_bold_markers() {
        // Required asymmetry: only bullets strip `**`.
        assert_eq!(
            classify_line("This has **bold** text"),
            LayoutOp::Paragraph("This has **bold** text".into())
        );
    }

    #[test]
    fn marker_only_lines_collapse_to_empty() {
        assert_eq!(classify_line("#"), LayoutOp::Heading(String::new()));
        assert_eq!(classify_line("**"), LayoutOp::Bullet(String::new()));
        assert_eq!(classify_line("-"), LayoutOp::Bullet(String::new()));
    }

    #[test]
    fn normalize_splits_collapsed_findings() {
        let input = "- **Modality:** CT - **Region:** Chest";
        let ops = lay_out(input);
        assert_eq!(
            ops,
            vec![
                LayoutOp::Bullet("Modality: CT".into()),
                LayoutOp::Bullet("Region: Chest".into()),
            ]
        );
    }

    #[test]
    fn normalize_leaves_line_start_bullets_alone() {
        let input = "- **Primary:** Pneumonia\n- **Confidence:** High";
        assert_eq!(normalize_bullet_runs(input), input);
    }

    #[test]
    fn transliteration_replaces_non_latin1() {
        // Latin-1 survives, emoji and CJK degrade to one '?' per char.
        assert_eq!(
            to_renderable("fi\u{00E8}vre \u{1F321} \u{9AD8}\u{71B1}"),
            "fi\u{00E8}vre ? ??"
        );
    }

    #[test]
    fn empty_lines_dropped() {
        assert!(lay_out("").is_empty());
        assert!(lay_out("\n\n   \n").is_empty());
    }

    #[test]
    fn error_string_renders_as_paragraph() {
        let ops = lay_out("Error: invalid API key");
        assert_eq!(ops, vec![LayoutOp::Paragraph("Error: invalid API key".into())]);
    }

    #[test]
    fn layout_is_deterministic() {
        let input = "## 3. Diagnosis\n- **Primary:** Pneumonia\nFollow-up in 2 weeks.";
        assert_eq!(lay_out(input), lay_out(input));
    }

    #[test]
    fn mixed_document_classifies_in_order() {
        let input = "## 2. Key Findings\n- **Finding 1:** Opacity\nNo prior studies available.";
        let ops = lay_out(input);
        assert_eq!(
            ops,
            vec![
                LayoutOp::Heading("2. Key Findings".into()),
                LayoutOp::Bullet("Finding 1: Opacity".into()),
                LayoutOp::Paragraph("No prior studies available.".into()),
            ]
        );
    }
}
