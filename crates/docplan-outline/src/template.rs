//! Built-in research document template and section guidance

use crate::types::{Level, OutlineItem, SectionId, Status};

/// Sections seeded into a fresh plan, in plan order
const TEMPLATE: [(&str, Level); 31] = [
    ("Title Page", Level::One),
    ("Abstract", Level::One),
    ("Table of Contents", Level::One),
    ("List of Figures", Level::One),
    ("List of Tables", Level::One),
    ("Introduction", Level::One),
    ("Background", Level::Two),
    ("Problem Statement", Level::Two),
    ("Research Questions", Level::Two),
    ("Significance of Study", Level::Two),
    ("Literature Review", Level::One),
    ("Theoretical Framework", Level::Two),
    ("Previous Research", Level::Two),
    ("Research Gap", Level::Two),
    ("Methodology", Level::One),
    ("Research Design", Level::Two),
    ("Data Collection", Level::Two),
    ("Data Analysis", Level::Two),
    ("Ethical Considerations", Level::Two),
    ("Results", Level::One),
    ("Primary Findings", Level::Two),
    ("Secondary Findings", Level::Two),
    ("Discussion", Level::One),
    ("Interpretation of Results", Level::Two),
    ("Limitations", Level::Two),
    ("Implications", Level::Two),
    ("Conclusion", Level::One),
    ("Summary", Level::Two),
    ("Future Research", Level::Two),
    ("References", Level::One),
    ("Appendices", Level::One),
];

/// Number of template sections
pub const TEMPLATE_LEN: usize = TEMPLATE.len();

/// Guidance text for a well-known section title
///
/// Exact title match; unknown titles get an empty comment.
#[must_use]
pub fn default_comment(title: &str) -> &'static str {
    match title {
        "Title Page" => "Include title, author name, date, and institutional affiliation.",
        "Abstract" => "Brief summary of the entire document (150-250 words).",
        "Introduction" => "Introduce the topic and provide context for the reader.",
        "Background" => "Provide relevant background information on the topic.",
        "Problem Statement" => "Clearly state the problem being addressed.",
        "Research Questions" => "List the specific questions this document aims to answer.",
        "Literature Review" => "Analyze and synthesize relevant existing research.",
        "Methodology" => "Describe the methods used to collect and analyze data.",
        "Results" => "Present findings without interpretation.",
        "Discussion" => "Interpret results and connect to existing literature.",
        "Conclusion" => "Summarize key findings and their implications.",
        "References" => "List all sources cited in the document.",
        _ => "",
    }
}

/// Template sections with ids `1..=31`
#[must_use]
pub fn template_items() -> Vec<OutlineItem> {
    TEMPLATE
        .iter()
        .zip(1u32..)
        .map(|(&(title, level), id)| {
            OutlineItem::new(SectionId(id), title, level)
                .with_status(Status::Empty)
                .with_comments(default_comment(title))
                .as_default()
        })
        .collect()
}
