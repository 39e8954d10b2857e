//! Subject Enhancer — wraps the raw concept with a style/scene-matched direction.
//!
//! Lookup: styles without a table borrow the cinematic table, then exact
//! (style, scene) list → the style's `character_focus` list → generic list.
//! The randomness source is injected.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::models::request::{CinematicStyle, SceneType};

const GENERIC_TEMPLATES: &[&str] = &[
    "Create a clear visual scene with {subject}.",
    "Show {subject} in an engaging way.",
    "Present {subject} effectively for video.",
];

pub const CLOSING_SENTENCE: &str =
    "Create a clear, visually engaging scene that works well for video generation.";

fn style_table(style: CinematicStyle, scene: SceneType) -> Option<&'static [&'static str]> {
    use CinematicStyle as St;
    use SceneType as Sc;

    let templates: &'static [&'static str] = match (style, scene) {
        (St::Dramatic, Sc::CharacterFocus) => &[
            "Show {subject} in an intense emotional moment.",
            "Capture {subject} during a moment of change.",
            "Focus on {subject} making an important decision.",
        ],
        (St::Dramatic, Sc::ActionSequence) => &[
            "Create dynamic movement around {subject}.",
            "Show {subject} in a high-energy situation.",
            "Build tension with {subject} at the center.",
        ],
        (St::Dramatic, Sc::StaticScene) => &[
            "Find tension in the stillness around {subject}.",
            "Show {subject} in a moment of quiet intensity.",
            "Create atmosphere around {subject}.",
        ],
        (St::Dramatic, Sc::Atmospheric) => &[
            "Place {subject} in a mood-setting environment.",
            "Use lighting and setting to enhance {subject}.",
            "Create environmental context for {subject}.",
        ],
        (St::Cinematic, Sc::CharacterFocus) => &[
            "Frame {subject} with careful composition.",
            "Capture {subject} in natural lighting.",
            "Show {subject} in an intimate moment.",
        ],
        (St::Cinematic, Sc::Atmospheric) => &[
            "Blend {subject} with their environment.",
            "Create natural atmosphere around {subject}.",
            "Show {subject} in their setting.",
        ],
        (St::Commercial, Sc::CharacterFocus) => &[
            "Present {subject} in a polished, attractive way.",
            "Show {subject} looking confident and successful.",
            "Capture {subject} in an aspirational setting.",
        ],
        (St::Realistic, Sc::CharacterFocus) => &[
            "Show {subject} authentically and naturally.",
            "Capture {subject} in an unguarded moment.",
            "Present {subject} without artifice.",
        ],
        (St::Stylized, Sc::CharacterFocus) => &[
            "Frame {subject} with precise composition.",
            "Place {subject} in a visually striking setting.",
            "Show {subject} with artistic visual style.",
        ],
        _ => return None,
    };
    Some(templates)
}

fn has_style_table(style: CinematicStyle) -> bool {
    style_table(style, SceneType::CharacterFocus).is_some()
}

/// Resolves the template list for a (style, scene) pair.
pub fn resolve_templates(style: CinematicStyle, scene: SceneType) -> &'static [&'static str] {
    let style = if has_style_table(style) {
        style
    } else {
        CinematicStyle::Cinematic
    };
    style_table(style, scene)
        .or_else(|| style_table(style, SceneType::CharacterFocus))
        .unwrap_or(GENERIC_TEMPLATES)
}

/// Picks one direction template at random and fills in the subject.
pub fn direction_for<R: Rng + ?Sized>(
    subject: &str,
    style: CinematicStyle,
    scene: SceneType,
    rng: &mut R,
) -> String {
    let templates = resolve_templates(style, scene);
    let template = templates.choose(rng).copied().unwrap_or(GENERIC_TEMPLATES[0]);
    debug!("Enhancement for {style}/{scene}: {template}");
    template.replace("{subject}", subject)
}

/// Builds the multi-paragraph enhanced subject block sent after the system prompt.
pub fn enhance_subject<R: Rng + ?Sized>(
    subject: &str,
    style: CinematicStyle,
    scene: SceneType,
    rng: &mut R,
) -> String {
    let direction = direction_for(subject, style, scene, rng);
    format!("Original concept: {subject}\n\nDirection: {direction}\n\n{CLOSING_SENTENCE}")
}
