use indicatif::ProgressStyle;

const REPOSITORY_TEMPLATE: &str = "{spinner} {prefix:.bold} {wide_msg}";

pub struct ProgressStyleTemplate;

impl ProgressStyleTemplate {
    pub fn repository() -> ProgressStyle {
        ProgressStyle::with_template(REPOSITORY_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}
