// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Deterministic SVG placeholder icons.
//!
//! When no real icon can be located the screener renders a 32x32 monogram
//! tile: the first two letters of the symbol on a hue derived from the
//! symbol's characters. Same symbol, same tile, every time — so the
//! fallback is stable across processes and cacheable.

/// Content type for generated placeholders.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Render the monogram tile for a symbol.
pub fn monogram_svg(symbol: &str) -> String {
    let letters: String = symbol
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(2)
        .collect::<String>()
        .to_ascii_uppercase();

    let hue = symbol.chars().map(|c| c as u32).sum::<u32>() % 360;
    let bg = format!("hsl({hue}, 35%, 14%)");
    let border = format!("hsl({hue}, 50%, 28%)");
    let color = format!("hsl({hue}, 70%, 65%)");

    // A single letter gets a larger face; the text baseline shifts with it.
    let (font_size, baseline) = if letters.len() == 1 {
        ("14", "20.9")
    } else {
        ("11", "19.85")
    };

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"32\" height=\"32\" viewBox=\"0 0 32 32\">\n\
         <rect width=\"32\" height=\"32\" rx=\"6\" fill=\"{bg}\" stroke=\"{border}\" stroke-width=\"1\"/>\n\
         <text x=\"16\" y=\"{baseline}\" text-anchor=\"middle\" dominant-baseline=\"middle\" \
         font-family=\"monospace\" font-weight=\"700\" font-size=\"{font_size}\" \
         fill=\"{color}\">{letters}</text>\n\
         </svg>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monogram_is_deterministic() {
        assert_eq!(monogram_svg("TSLAx"), monogram_svg("TSLAx"));
    }

    #[test]
    fn monogram_takes_first_two_letters_uppercased() {
        let svg = monogram_svg("TSLAx");
        assert!(svg.contains(">TS</text>"));

        let svg = monogram_svg("aapl");
        assert!(svg.contains(">AA</text>"));
    }

    #[test]
    fn monogram_skips_non_letters() {
        let svg = monogram_svg("1INCH");
        assert!(svg.contains(">IN</text>"));
    }

    #[test]
    fn different_symbols_get_different_hues() {
        // "AAPLx" and "AMZNx" sum to different char totals mod 360.
        let a = monogram_svg("AAPLx");
        let b = monogram_svg("AMZNx");
        assert_ne!(a, b);
    }

    #[test]
    fn output_is_a_complete_svg_document() {
        let svg = monogram_svg("TSLAx");
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("<text"));
    }

    #[test]
    fn symbol_without_letters_still_renders() {
        let svg = monogram_svg("??");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("></text>"));
    }
}
