use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PrompterError;
use crate::models::image::ImageBatch;

/// WAN 2.2 model variants the prompt is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WanModel {
    #[default]
    #[serde(rename = "T2V-A14B")]
    T2vA14b,
    #[serde(rename = "I2V-A14B")]
    I2vA14b,
    #[serde(rename = "TI2V-5B")]
    Ti2v5b,
}

impl WanModel {
    pub const ALL: [WanModel; 3] = [WanModel::T2vA14b, WanModel::I2vA14b, WanModel::Ti2v5b];

    pub fn as_str(&self) -> &'static str {
        match self {
            WanModel::T2vA14b => "T2V-A14B",
            WanModel::I2vA14b => "I2V-A14B",
            WanModel::Ti2v5b => "TI2V-5B",
        }
    }
}

/// Cinematic style presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CinematicStyle {
    Dramatic,
    Gentle,
    #[default]
    Cinematic,
    Realistic,
    Stylized,
    Commercial,
}

impl CinematicStyle {
    pub const ALL: [CinematicStyle; 6] = [
        CinematicStyle::Dramatic,
        CinematicStyle::Gentle,
        CinematicStyle::Cinematic,
        CinematicStyle::Realistic,
        CinematicStyle::Stylized,
        CinematicStyle::Commercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CinematicStyle::Dramatic => "dramatic",
            CinematicStyle::Gentle => "gentle",
            CinematicStyle::Cinematic => "cinematic",
            CinematicStyle::Realistic => "realistic",
            CinematicStyle::Stylized => "stylized",
            CinematicStyle::Commercial => "commercial",
        }
    }
}

/// Scene categories, each implying a different kind of camera work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneType {
    StaticScene,
    #[default]
    CharacterFocus,
    ActionSequence,
    Atmospheric,
}

impl SceneType {
    pub const ALL: [SceneType; 4] = [
        SceneType::StaticScene,
        SceneType::CharacterFocus,
        SceneType::ActionSequence,
        SceneType::Atmospheric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneType::StaticScene => "static_scene",
            SceneType::CharacterFocus => "character_focus",
            SceneType::ActionSequence => "action_sequence",
            SceneType::Atmospheric => "atmospheric",
        }
    }
}

macro_rules! selector_str_impls {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = PrompterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| PrompterError::UnknownSelector {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

selector_str_impls!(WanModel, "model");
selector_str_impls!(CinematicStyle, "style");
selector_str_impls!(SceneType, "scene");

/// Opaque host credentials, forwarded to the model call untouched.
#[derive(Debug, Clone, Default)]
pub struct AuthCredentials {
    pub auth_token: Option<String>,
    pub api_key: Option<String>,
}

/// How the subject text is checked before enhancement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubjectRule {
    /// Reject empty or whitespace-only subjects.
    #[default]
    NonBlank,
    /// Accept any subject, including empty text.
    Unchecked,
}

impl SubjectRule {
    pub fn check(&self, subject: &str) -> Result<(), PrompterError> {
        match self {
            SubjectRule::NonBlank if subject.trim().is_empty() => Err(
                PrompterError::InvalidInput("subject cannot be empty".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

/// One invocation of the prompter node. Immutable once built.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub subject: String,
    pub wan_model: WanModel,
    pub style: CinematicStyle,
    pub scene: SceneType,
    /// Remote LLM identifier, e.g. `gemini-2.5-pro-preview-05-06`.
    pub remote_model: String,
    pub explicit_content: bool,
    pub reference_image: Option<ImageBatch>,
    pub custom_instructions: Option<String>,
    /// Host node id; progress notifications are only sent when present.
    pub node_id: Option<String>,
    pub credentials: AuthCredentials,
}

impl GenerationRequest {
    pub fn new(subject: impl Into<String>, remote_model: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            wan_model: WanModel::default(),
            style: CinematicStyle::default(),
            scene: SceneType::default(),
            remote_model: remote_model.into(),
            explicit_content: false,
            reference_image: None,
            custom_instructions: None,
            node_id: None,
            credentials: AuthCredentials::default(),
        }
    }

    /// Builds a request from the raw string selectors a host graph hands over.
    pub fn from_host_inputs(
        subject: &str,
        wan_model: &str,
        style: &str,
        scene: &str,
        remote_model: &str,
    ) -> Result<Self, PrompterError> {
        Ok(Self {
            wan_model: wan_model.parse()?,
            style: style.parse()?,
            scene: scene.parse()?,
            ..Self::new(subject, remote_model)
        })
    }

    pub fn with_model(mut self, model: WanModel) -> Self {
        self.wan_model = model;
        self
    }

    pub fn with_style(mut self, style: CinematicStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_scene(mut self, scene: SceneType) -> Self {
        self.scene = scene;
        self
    }

    pub fn with_explicit_content(mut self, explicit: bool) -> Self {
        self.explicit_content = explicit;
        self
    }

    pub fn with_reference_image(mut self, image: ImageBatch) -> Self {
        self.reference_image = Some(image);
        self
    }

    pub fn with_custom_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.custom_instructions = Some(instructions.into());
        self
    }

    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn with_credentials(mut self, credentials: AuthCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Custom instructions trimmed, or `None` when absent or blank.
    pub fn trimmed_instructions(&self) -> Option<&str> {
        self.custom_instructions
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
