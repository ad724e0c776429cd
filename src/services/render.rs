use crate::models::TourRecord;
use crate::services::sanitize::TextSanitizer;
use std::fmt::Write;
use std::sync::Arc;

const CELL_STYLE: &str = "padding:12px;";

/// Builds the listing body: promotional paragraph plus a details table.
pub struct ContentRenderer {
    promo_html: String,
    sanitizer: Arc<dyn TextSanitizer>,
}

impl ContentRenderer {
    #[must_use]
    pub fn new(promo_html: impl Into<String>, sanitizer: Arc<dyn TextSanitizer>) -> Self {
        Self {
            promo_html: promo_html.into(),
            sanitizer,
        }
    }

    #[must_use]
    pub fn render(&self, tour: &TourRecord, display_date: &str, display_duration: &str) -> String {
        let field = |value: &Option<String>| self.sanitizer.html(value.as_deref().unwrap_or(""));

        let rows = [
            ("عنوان پرواز", field(&tour.air_line_title)),
            ("کلاس هتل", format!("{} ستاره", field(&tour.hotel_class))),
            ("مقصد", field(&tour.serialized_city)),
            ("تاریخ شروع سفر", self.sanitizer.html(display_date)),
            ("مدت زمان تور", self.sanitizer.html(display_duration)),
        ];

        let mut html = String::new();
        html.push_str(&self.promo_html);
        html.push_str(
            "\n<table style=\"width:100%;border-collapse:collapse;margin-top:30px;\">\n\
             <thead>\n\
             <tr style=\"background-color:#4e6813;color:#fff;\">\n\
             <th style=\"padding:15px;\">عنوان</th>\n\
             <th style=\"padding:15px;\">توضیحات</th>\n\
             </tr>\n\
             </thead>\n\
             <tbody>\n",
        );

        for (label, value) in rows {
            let _ = writeln!(
                html,
                "<tr><td style=\"{CELL_STYLE}\">{label}</td><td style=\"{CELL_STYLE}\">{value}</td></tr>"
            );
        }

        html.push_str("</tbody>\n</table>");
        html
    }
}
