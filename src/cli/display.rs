// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering for the djibly CLI.
//!
//! Colors are picked by role ([`Tone`]), not by hue, so the dark and light
//! palettes stay interchangeable. `DJIBLY_THEME=light` selects the light
//! palette; anything else is dark. `NO_COLOR` or a non-TTY stdout turns
//! color off and output is plain text.
//!
//! Result rows keep the shape shoppers already know from the demo:
//!
//! ```text
//!    [****] (0.87) -> Internet Pack 2000 [2000 DA]
//! ```

use std::sync::OnceLock;

use djibly::SearchHit;

/// Stars shown for a perfect score.
pub const MAX_STARS: usize = 5;

/// Width of the label column in `inspect` and training summaries.
const LABEL_WIDTH: usize = 14;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("light" | "l") => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

/// What a piece of text means, independent of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Query echoes and banner rules.
    Accent,
    /// Product names and titles.
    Title,
    /// Confident scores, checks that passed.
    Good,
    /// Borderline scores, star bars.
    Warn,
    /// Failures and the not-ready notice.
    Bad,
    /// Labels and low-confidence scores.
    Muted,
}

impl Tone {
    fn rgb(self, theme: Theme) -> (u8, u8, u8) {
        match (theme, self) {
            (Theme::Dark, Tone::Accent) => (97, 175, 239),
            (Theme::Dark, Tone::Title) => (102, 217, 239),
            (Theme::Dark, Tone::Good) => (152, 195, 121),
            (Theme::Dark, Tone::Warn) => (229, 192, 123),
            (Theme::Dark, Tone::Bad) => (224, 108, 117),
            (Theme::Dark, Tone::Muted) => (92, 99, 112),
            (Theme::Light, Tone::Accent) => (64, 120, 242),
            (Theme::Light, Tone::Title) => (1, 112, 158),
            (Theme::Light, Tone::Good) => (80, 161, 79),
            (Theme::Light, Tone::Warn) => (193, 132, 1),
            (Theme::Light, Tone::Bad) => (228, 86, 73),
            (Theme::Light, Tone::Muted) => (160, 161, 167),
        }
    }
}

fn theme() -> Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    *THEME.get_or_init(|| Theme::from_env_value(std::env::var("DJIBLY_THEME").ok().as_deref()))
}

fn use_colors() -> bool {
    static COLORS: OnceLock<bool> = OnceLock::new();
    *COLORS.get_or_init(|| std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout))
}

fn style(tone: Tone, bold: bool, text: &str, theme: Theme) -> String {
    let (r, g, b) = tone.rgb(theme);
    let weight = if bold { BOLD } else { "" };
    format!("{weight}\x1b[38;2;{r};{g};{b}m{text}{RESET}")
}

/// `text` in the color for `tone`, or unchanged when color is off.
pub fn paint(tone: Tone, text: &str) -> String {
    if use_colors() {
        style(tone, false, text, theme())
    } else {
        text.to_string()
    }
}

/// Like [`paint`], bold.
pub fn paint_bold(tone: Tone, text: &str) -> String {
    if use_colors() {
        style(tone, true, text, theme())
    } else {
        text.to_string()
    }
}

/// `1536` → `1.5 KB`.
pub fn format_size(bytes: usize) -> String {
    let mut value = bytes as f64;
    for unit in ["B", "KB"] {
        if value < 1024.0 {
            return if unit == "B" {
                format!("{bytes} B")
            } else {
                format!("{value:.1} {unit}")
            };
        }
        value /= 1024.0;
    }
    format!("{value:.1} MB")
}

/// Section title for `inspect` and training summaries.
pub fn heading(label: &str) {
    println!("\n{}", paint_bold(Tone::Accent, &format!("== {label}")));
}

/// One `label  value` line under a [`heading`].
pub fn field(label: &str, value: &str) {
    let label = format!("{label:<LABEL_WIDTH$}");
    println!("  {} {}", paint(Tone::Muted, &label), value);
}

/// `int(score * 5)` asterisks.
pub fn stars(score: f64) -> String {
    let count = (score.clamp(0.0, 1.0) * MAX_STARS as f64) as usize;
    "*".repeat(count)
}

/// Prices are whole dinars in practice; keep cents only when present.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.0} DA", price)
    } else {
        format!("{:.2} DA", price)
    }
}

fn score_tone(score: f64) -> Tone {
    if score >= 0.5 {
        Tone::Good
    } else if score >= 0.2 {
        Tone::Warn
    } else {
        Tone::Muted
    }
}

/// One result line: `   [****] (0.87) -> Name [2000 DA]`
pub fn hit_line(hit: &SearchHit) -> String {
    format!(
        "   [{}] ({}) -> {} [{}]",
        paint(Tone::Warn, &stars(hit.score)),
        paint(score_tone(hit.score), &format!("{:.2}", hit.score)),
        paint_bold(Tone::Title, &hit.product_name),
        format_price(hit.price)
    )
}

/// Hits as a pretty-printed JSON array, for `search --json`.
pub fn hits_json(hits: &[SearchHit]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(hits)
}

pub fn query_header(query: &str) {
    println!("\n>> User Search: '{}'", paint_bold(Tone::Accent, query));
}

/// Confident hits, or a line saying there were none.
pub fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("   {}", paint(Tone::Muted, "(No relevant results found)"));
        return;
    }
    for hit in hits {
        println!("{}", hit_line(hit));
    }
}

/// Distinct from "no results": nothing is loaded to search with.
pub fn print_not_ready() {
    println!("   {}", paint(Tone::Bad, "(System not ready: train or load a model first)"));
}

pub fn banner(text: &str) {
    let rule = "=".repeat(50);
    println!("\n{}", paint(Tone::Accent, &rule));
    println!("   {}   ", paint_bold(Tone::Title, text));
    println!("{}", paint(Tone::Accent, &rule));
}
