// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! Minimal HTML report assembly for the demo snapshots.

/// One rendered demo: a heading, a blurb, and the SVG markup.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) svg: String,
}

/// Renders all sections into one self-contained HTML document.
pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{title}</title>\n"));
    out.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 24px; }\n\
         section { margin-bottom: 32px; }\n\
         p.desc { color: #555; max-width: 60em; }\n\
         svg { border: 1px solid #ddd; }\n\
         </style>\n</head>\n<body>\n",
    );
    out.push_str(&format!("<h1>{title}</h1>\n"));
    for section in sections {
        out.push_str("<section>\n");
        out.push_str(&format!("<h2>{}</h2>\n", section.title));
        out.push_str(&format!("<p class=\"desc\">{}</p>\n", section.description));
        out.push_str(&section.svg);
        out.push_str("</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}
