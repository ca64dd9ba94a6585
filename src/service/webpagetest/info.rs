//! Test detail summary printed with `--info`.

use serde_json::Value;

use crate::ui::PerflintTheme;

/// Details of a completed WebPageTest run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestInfo {
    pub url: String,
    pub id: String,
    pub location: String,
    pub connectivity: String,
    pub latency: String,
    /// Median first-view result pages, as `(label, link)`.
    pub pages: Vec<(String, String)>,
}

const PAGE_LINKS: [(&str, &str); 5] = [
    ("Details", "details"),
    ("Checklist", "checklist"),
    ("Breakdown", "breakdown"),
    ("Domains", "domains"),
    ("Screenshot", "screenShot"),
];

impl TestInfo {
    /// Collect details from a `jsonResult.php` data document.
    pub fn from_results(data: &Value) -> Self {
        let field = |name: &str| data.get(name).map(text).unwrap_or_default();
        let pages = data
            .pointer("/median/firstView/pages")
            .map(|pages| {
                PAGE_LINKS
                    .iter()
                    .filter_map(|(label, key)| {
                        pages.get(*key).map(|link| (label.to_string(), text(link)))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            url: field("url"),
            id: field("id"),
            location: field("location"),
            connectivity: field("connectivity"),
            latency: field("latency"),
            pages,
        }
    }

    /// Render the details block.
    pub fn render(&self, theme: &PerflintTheme) -> String {
        let line = |label: &str, value: &str| {
            format!(
                "{}: {}\n",
                theme.dim.apply_to(label),
                theme.value.apply_to(value)
            )
        };

        let mut output = format!("\n{}\n", theme.heading.apply_to("Details"));
        output.push_str(&line("URL", &self.url));
        output.push_str(&line("ID", &self.id));
        output.push_str(&line("Location", &self.location));
        output.push_str(&line("Connectivity", &self.connectivity));
        output.push_str(&line("Latency", &self.latency));

        if !self.pages.is_empty() {
            output.push_str(&format!("\n{}\n", theme.heading.apply_to("Pages")));
            for (label, link) in &self.pages {
                output.push_str(&line(label, link));
            }
        }
        output
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> Value {
        json!({
            "id": "170101_AB_1",
            "url": "https://example.com",
            "location": "Dulles:Chrome",
            "connectivity": "Cable",
            "latency": 28,
            "median": {
                "firstView": {
                    "pages": {
                        "details": "https://wpt/details",
                        "checklist": "https://wpt/checklist",
                        "screenShot": "https://wpt/screenshot"
                    }
                }
            }
        })
    }

    #[test]
    fn collects_fields() {
        let info = TestInfo::from_results(&data());
        assert_eq!(info.id, "170101_AB_1");
        assert_eq!(info.latency, "28");
        assert_eq!(
            info.pages,
            vec![
                ("Details".to_string(), "https://wpt/details".to_string()),
                ("Checklist".to_string(), "https://wpt/checklist".to_string()),
                ("Screenshot".to_string(), "https://wpt/screenshot".to_string()),
            ]
        );
    }

    #[test]
    fn renders_plain_block() {
        let output = TestInfo::from_results(&data()).render(&PerflintTheme::plain());
        assert!(output.starts_with("\nDetails\nURL: https://example.com\nID: 170101_AB_1\n"));
        assert!(output.contains("Connectivity: Cable\n"));
        assert!(output.contains("\nPages\nDetails: https://wpt/details\n"));
    }

    #[test]
    fn missing_pages_section_is_omitted() {
        let output = TestInfo::from_results(&json!({ "id": "x" })).render(&PerflintTheme::plain());
        assert!(!output.contains("Pages"));
        assert!(output.contains("ID: x\n"));
    }
}
