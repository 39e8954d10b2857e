//! Node registration metadata for the host graph runtime.

use serde::Serialize;

use crate::config::Config;
use crate::llm_client::SUPPORTED_MODELS;
use crate::models::request::{CinematicStyle, SceneType, WanModel};

pub const CLASS_NAME: &str = "WAN22ExpertPrompter";
pub const DISPLAY_NAME: &str = "🎬 WAN 2.2 Expert Prompter";
pub const CATEGORY: &str = "video/WAN 2.2";
pub const DESCRIPTION: &str = "🎬 WAN 2.2 Expert Prompter powered by Gemini AI with enhanced UI.";
pub const DEFAULT_SUBJECT: &str = "A warrior in a moonlit forest";

pub const RETURN_TYPES: [&str; 5] = ["STRING", "STRING", "STRING", "INT", "STRING"];
pub const RETURN_NAMES: [&str; 5] = [
    "optimized_prompt",
    "negative_prompt",
    "technical_analysis",
    "word_count",
    "mode_status",
];

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum InputKind {
    String { multiline: bool, default: String },
    Combo { options: Vec<String>, default: String },
    Boolean { default: bool },
    Image,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputField {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeInputs {
    pub required: Vec<InputField>,
    pub optional: Vec<InputField>,
    /// Host-injected values: input name → host key.
    pub hidden: Vec<(&'static str, &'static str)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeDescriptor {
    pub class_name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub api_node: bool,
    pub inputs: NodeInputs,
    pub return_types: [&'static str; 5],
    pub return_names: [&'static str; 5],
}

fn combo<T: ToString>(options: impl IntoIterator<Item = T>, default: T) -> InputKind {
    InputKind::Combo {
        options: options.into_iter().map(|o| o.to_string()).collect(),
        default: default.to_string(),
    }
}

fn field(name: &'static str, kind: InputKind) -> InputField {
    InputField {
        name,
        kind,
        tooltip: None,
    }
}

/// Full registration record handed to the host at load time.
///
/// The remote model combo defaults to the configured model.
pub fn descriptor(config: &Config) -> NodeDescriptor {
    NodeDescriptor {
        class_name: CLASS_NAME,
        display_name: DISPLAY_NAME,
        description: DESCRIPTION,
        category: CATEGORY,
        api_node: true,
        inputs: NodeInputs {
            required: vec![
                InputField {
                    tooltip: Some("Describe your video concept in simple terms."),
                    ..field(
                        "user_subject",
                        InputKind::String {
                            multiline: true,
                            default: DEFAULT_SUBJECT.to_string(),
                        },
                    )
                },
                field("wan_model", combo(WanModel::ALL, WanModel::default())),
                field(
                    "cinematic_style",
                    combo(CinematicStyle::ALL, CinematicStyle::default()),
                ),
                field("scene_type", combo(SceneType::ALL, SceneType::default())),
                field("gemini_model", combo(SUPPORTED_MODELS, config.default_model.as_str())),
            ],
            optional: vec![
                field("reference_image", InputKind::Image),
                field(
                    "custom_instructions",
                    InputKind::String {
                        multiline: true,
                        default: String::new(),
                    },
                ),
                InputField {
                    tooltip: Some("Enable explicit NSFW prompting"),
                    ..field("nsfw_mode", InputKind::Boolean { default: false })
                },
            ],
            hidden: vec![
                ("auth_token", "AUTH_TOKEN_COMFY_ORG"),
                ("comfy_api_key", "API_KEY_COMFY_ORG"),
                ("unique_id", "UNIQUE_ID"),
            ],
        },
        return_types: RETURN_TYPES,
        return_names: RETURN_NAMES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::GenerationRequest;

    fn combo_of<'a>(fields: &'a [InputField], name: &str) -> (&'a [String], &'a str) {
        match &fields.iter().find(|f| f.name == name).unwrap().kind {
            InputKind::Combo { options, default } => (options.as_slice(), default.as_str()),
            other => panic!("{name} is not a combo: {other:?}"),
        }
    }

    #[test]
    fn test_combo_defaults_parse_back_into_request() {
        let d = descriptor(&Config::default());
        let (_, model) = combo_of(&d.inputs.required, "wan_model");
        let (_, style) = combo_of(&d.inputs.required, "cinematic_style");
        let (_, scene) = combo_of(&d.inputs.required, "scene_type");
        let (_, remote) = combo_of(&d.inputs.required, "gemini_model");

        let request =
            GenerationRequest::from_host_inputs(DEFAULT_SUBJECT, model, style, scene, remote)
                .unwrap();
        assert_eq!(request.wan_model, WanModel::T2vA14b);
        assert_eq!(request.style, CinematicStyle::Cinematic);
        assert_eq!(request.scene, SceneType::CharacterFocus);
    }

    #[test]
    fn test_combo_options_cover_every_variant() {
        let d = descriptor(&Config::default());
        let (styles, _) = combo_of(&d.inputs.required, "cinematic_style");
        assert_eq!(
            styles,
            ["dramatic", "gentle", "cinematic", "realistic", "stylized", "commercial"]
        );
        let (models, _) = combo_of(&d.inputs.required, "wan_model");
        assert_eq!(models, ["T2V-A14B", "I2V-A14B", "TI2V-5B"]);
    }

    #[test]
    fn test_remote_model_default_follows_config() {
        let config = Config {
            default_model: SUPPORTED_MODELS[1].to_string(),
            ..Config::default()
        };
        let d = descriptor(&config);
        let (options, default) = combo_of(&d.inputs.required, "gemini_model");
        assert_eq!(default, "gemini-2.5-flash-preview-04-17");
        assert_eq!(options, SUPPORTED_MODELS);
    }

    #[test]
    fn test_return_names_follow_outcome_order() {
        assert_eq!(RETURN_NAMES.len(), RETURN_TYPES.len());
        assert_eq!(RETURN_NAMES[3], "word_count");
        assert_eq!(RETURN_TYPES[3], "INT");
    }

    #[test]
    fn test_descriptor_serializes_flat_inputs() {
        let json = serde_json::to_value(descriptor(&Config::default())).unwrap();
        let subject = &json["inputs"]["required"][0];
        assert_eq!(subject["name"], "user_subject");
        assert_eq!(subject["type"], "STRING");
        assert_eq!(subject["default"], DEFAULT_SUBJECT);
        assert_eq!(json["inputs"]["optional"][2]["type"], "BOOLEAN");
        assert!(json["inputs"]["optional"][0].get("tooltip").is_none());
    }
}
