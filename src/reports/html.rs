//! HTML report generator.
//!
//! Produces one self-contained page: inline CSS, no scripts, no external
//! assets, so the file can be emailed or opened offline.

use super::escape::{escape_html, escape_html_attr, escape_html_opt, is_safe_href};
use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::model::PlaceReview;
use crate::pipeline::{AuditResult, SectionResult};
use crate::scoring::{SCORING_ENGINE_VERSION, ScoreBucket, SmileScore};
use std::fmt::Write;

/// HTML report generator
pub struct HtmlReporter {
    /// Include inline CSS
    include_styles: bool,
}

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_styles: true,
        }
    }

    /// Leave out the stylesheet
    #[must_use]
    pub const fn without_styles(mut self) -> Self {
        self.include_styles = false;
        self
    }

    fn get_styles(&self) -> &'static str {
        r#"
        <style>
            :root {
                --accent: #6d28d9;
                --accent-2: #4f46e5;
                --text: #111827;
                --muted: #6b7280;
                --border: #e5e7eb;
                --panel: #fafafa;
                --good: #16a34a;
                --fair: #d97706;
                --poor: #dc2626;
            }

            body {
                font-family: system-ui, -apple-system, 'Segoe UI', Roboto, Arial, sans-serif;
                color: var(--text);
                background: #fff;
                margin: 0;
                padding: 24px;
                line-height: 1.55;
            }

            .container { max-width: 1080px; margin: 0 auto; }

            h1 { margin: 0 0 8px; color: var(--accent); font-size: 30px; }
            h2 { margin: 24px 0 12px; color: var(--accent-2); }

            .header-info {
                background: #f8fafc;
                padding: 16px;
                border-radius: 8px;
                border: 1px solid var(--border);
                margin-bottom: 20px;
            }

            .scores {
                display: grid;
                grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
                gap: 12px;
                margin: 16px 0 24px;
            }

            .chip {
                border: 1px solid var(--border);
                border-radius: 12px;
                padding: 10px 12px;
            }

            .chip-label {
                font-size: 12px;
                color: var(--muted);
                text-transform: uppercase;
                letter-spacing: .03em;
            }

            .chip-value { font-size: 20px; font-weight: 700; margin-top: 4px; }

            .bar {
                height: 8px;
                border-radius: 999px;
                background: #f3f4f6;
                margin-top: 6px;
                overflow: hidden;
            }

            .bar span { display: block; height: 100%; }
            .bar .good { background: var(--good); }
            .bar .fair { background: var(--fair); }
            .bar .poor { background: var(--poor); }

            section {
                margin-bottom: 24px;
                background: var(--panel);
                padding: 16px;
                border-radius: 8px;
                border-left: 4px solid var(--accent);
            }

            table { border-collapse: collapse; width: 100%; }
            th, td { border: 1px solid var(--border); padding: 10px 12px; text-align: left; vertical-align: top; }
            th { background: #f8fafc; font-weight: 600; color: #374151; }
            td.metric { width: 28%; font-weight: 600; }
            td.limited { color: var(--muted); font-style: italic; }
            td.advice { width: 34%; }
            td.nailed { color: var(--good); font-weight: 600; }

            .reviews li {
                list-style: none;
                margin-bottom: 12px;
                padding: 10px;
                border-left: 3px solid #22d3ee;
                background: #f0f9ff;
            }

            .reviews ul { padding: 0; }
            .star { color: #f59e0b; }
            .star-empty { color: #d1d5db; }
            .review-meta { color: var(--muted); font-size: 0.9em; }

            a { color: #0b57d0; text-decoration: none; }
            a:hover { text-decoration: underline; }

            .footer {
                text-align: center;
                margin-top: 32px;
                padding: 20px;
                background: #f1f5f9;
                border-radius: 8px;
                color: #64748b;
                font-size: 0.9em;
            }
        </style>
        "#
    }

    fn write_header(
        &self,
        html: &mut String,
        result: &AuditResult,
        title: &str,
    ) -> Result<(), ReportError> {
        let request = &result.request;
        writeln!(html, "<div class=\"header\">")?;
        writeln!(html, "    <h1>{}</h1>", escape_html(title))?;
        writeln!(html, "    <div class=\"header-info\">")?;
        writeln!(
            html,
            "        <strong>Practice:</strong> {}<br>",
            escape_html(request.practice_name())
        )?;
        writeln!(
            html,
            "        <strong>Doctor:</strong> {}<br>",
            escape_html_opt(request.doctor_name())
        )?;
        writeln!(
            html,
            "        <strong>Website:</strong> {} &nbsp;|&nbsp; <strong>Email:</strong> {} &nbsp;|&nbsp; <strong>Phone:</strong> {}<br>",
            link_or_text(request.website(), request.website()),
            escape_html(request.email()),
            escape_html(request.phone())
        )?;
        let address = match result.maps_link.as_deref() {
            Some(maps) => link_or_text(maps, request.address()),
            None => escape_html(request.address()),
        };
        writeln!(html, "        <strong>Address:</strong> {address}")?;
        writeln!(html, "    </div>")?;
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_scores(&self, html: &mut String, result: &AuditResult) -> Result<(), ReportError> {
        writeln!(html, "<div class=\"scores\">")?;
        for bucket in ScoreBucket::ALL {
            let pct = result.score.percent_of_max(bucket, &result.weights);
            writeln!(html, "    <div class=\"chip\">")?;
            writeln!(html, "        <div class=\"chip-label\">{}</div>", bucket.label())?;
            writeln!(
                html,
                "        <div class=\"chip-value\">{} / {}</div>",
                result.score.get(bucket),
                SmileScore::max(bucket, &result.weights)
            )?;
            writeln!(
                html,
                "        <div class=\"bar\"><span class=\"{}\" style=\"width:{:.0}%\"></span></div>",
                band(pct),
                pct
            )?;
            writeln!(html, "    </div>")?;
        }
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_section(&self, html: &mut String, section: &SectionResult) -> Result<(), ReportError> {
        writeln!(html, "<section>")?;
        writeln!(html, "    <h2>{}</h2>", section.kind().title())?;
        writeln!(html, "    <table>")?;
        writeln!(
            html,
            "        <thead><tr><th>Metric</th><th>Result</th><th>Recommendation</th></tr></thead>"
        )?;
        writeln!(html, "        <tbody>")?;
        for (name, value, advice) in section.rows() {
            let value_class = if value.is_sentinel() { " class=\"limited\"" } else { "" };
            let advice_class = if advice == crate::advisory::AFFIRMATION {
                "advice nailed"
            } else {
                "advice"
            };
            writeln!(html, "            <tr>")?;
            writeln!(html, "                <td class=\"metric\">{}</td>", escape_html(name))?;
            writeln!(
                html,
                "                <td{value_class}>{}</td>",
                escape_html(&value.to_string())
            )?;
            writeln!(
                html,
                "                <td class=\"{advice_class}\">{}</td>",
                escape_html(advice)
            )?;
            writeln!(html, "            </tr>")?;
        }
        writeln!(html, "        </tbody>")?;
        writeln!(html, "    </table>")?;
        writeln!(html, "</section>")?;
        Ok(())
    }

    fn write_reviews(
        &self,
        html: &mut String,
        reviews: &[PlaceReview],
        config: &ReportConfig,
    ) -> Result<(), ReportError> {
        if reviews.is_empty() || config.max_reviews == 0 {
            return Ok(());
        }
        writeln!(html, "<section class=\"reviews\">")?;
        writeln!(html, "    <h2>Recent Google Reviews</h2>")?;
        writeln!(html, "    <ul>")?;
        for review in reviews.iter().take(config.max_reviews) {
            writeln!(html, "        <li>")?;
            writeln!(
                html,
                "            <strong>{}</strong> {}",
                escape_html(review.author_name.as_deref().unwrap_or("Anonymous")),
                stars(review.rating)
            )?;
            if let Some(when) = &review.relative_time_description {
                writeln!(
                    html,
                    "            <span class=\"review-meta\">{}</span>",
                    escape_html(when)
                )?;
            }
            writeln!(
                html,
                "            <p>{}</p>",
                escape_html(&truncate_chars(&review.text, config.review_chars))
            )?;
            writeln!(html, "        </li>")?;
        }
        writeln!(html, "    </ul>")?;
        writeln!(html, "</section>")?;
        Ok(())
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, result: &AuditResult, config: &ReportConfig) -> Result<String, ReportError> {
        let mut html = String::new();
        let title = config.title_for(result.request.practice_name());

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "    <meta charset=\"UTF-8\">")?;
        writeln!(
            html,
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(html, "    <title>{}</title>", escape_html(&title))?;
        if self.include_styles {
            writeln!(html, "{}", self.get_styles())?;
        }
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<div class=\"container\">")?;

        self.write_header(&mut html, result, &title)?;
        self.write_scores(&mut html, result)?;
        for section in &result.sections {
            self.write_section(&mut html, section)?;
        }
        self.write_reviews(&mut html, &result.reviews, config)?;

        writeln!(html, "<div class=\"footer\">")?;
        writeln!(
            html,
            "    <p>Generated by smile-audit v{} (scoring {}) on {}</p>",
            env!("CARGO_PKG_VERSION"),
            SCORING_ENGINE_VERSION,
            result.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            html,
            "    <p>Values marked &quot;{}&quot; could not be checked and are left out of the score.</p>",
            crate::model::Sentinel::SearchLimited
        )?;
        writeln!(html, "</div>")?;

        writeln!(html, "</div>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;
        Ok(html)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }
}

/// CSS class for a bar by share of the maximum.
fn band(pct: f64) -> &'static str {
    if pct >= 70.0 {
        "good"
    } else if pct >= 40.0 {
        "fair"
    } else {
        "poor"
    }
}

/// An anchor for http(s) links, plain escaped text otherwise.
fn link_or_text(href: &str, text: &str) -> String {
    if is_safe_href(href) {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape_html_attr(href),
            escape_html(text)
        )
    } else {
        escape_html(text)
    }
}

/// Five stars, the rounded rating filled.
fn stars(rating: Option<f64>) -> String {
    let filled = rating
        .filter(|r| r.is_finite())
        .map_or(0, |r| r.round().clamp(0.0, 5.0) as usize);
    let mut out = String::new();
    for i in 0..5 {
        let class = if i < filled { "star" } else { "star-empty" };
        out.push_str("<span class=\"");
        out.push_str(class);
        out.push_str("\">★</span>");
    }
    out
}

/// Cut at a character boundary, marking the cut.
fn truncate_chars(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push('…');
    cut
}
