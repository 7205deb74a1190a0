//! Node presentation derived from node kind.
//!
//! Styling is role-based: trigger kinds get the primary theme, the terminal
//! kind gets the destructive theme, everything else gets the neutral card
//! theme. Style computation is an explicit step at creation and load time;
//! it is never re-run on read, which would erase per-node overrides.

use serde::{Deserialize, Serialize};

use crate::model::NodeKind;

const PRIMARY_BACKGROUND: &str = "#6366f1";
const DESTRUCTIVE_BACKGROUND: &str = "#ef4444";
const CARD_BACKGROUND: &str = "#ffffff";
const LIGHT_TEXT: &str = "#ffffff";
const DARK_TEXT: &str = "#0f172a";
const CARD_BORDER: &str = "1px solid #e2e8f0";

/// Visual role a node kind maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Trigger,
    Terminal,
    Action,
}

impl NodeRole {
    pub fn of(kind: &NodeKind) -> Self {
        if kind.is_trigger() {
            NodeRole::Trigger
        } else if kind.is_terminal() {
            NodeRole::Terminal
        } else {
            NodeRole::Action
        }
    }
}

/// Inline presentation attributes carried by a node.
///
/// Serialized in camelCase to match the canvas wire format. Unset fields are
/// omitted, so a partial override object stays partial on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<String>,
}

impl NodeStyle {
    /// Canonical style for a node kind. Pure: same kind, same style.
    pub fn for_kind(kind: &NodeKind) -> Self {
        let (background, color, border) = match NodeRole::of(kind) {
            NodeRole::Trigger => (PRIMARY_BACKGROUND, LIGHT_TEXT, format!("1px solid {PRIMARY_BACKGROUND}")),
            NodeRole::Terminal => (DESTRUCTIVE_BACKGROUND, LIGHT_TEXT, format!("1px solid {DESTRUCTIVE_BACKGROUND}")),
            NodeRole::Action => (CARD_BACKGROUND, DARK_TEXT, CARD_BORDER.to_string()),
        };
        Self {
            background: Some(background.to_string()),
            color: Some(color.to_string()),
            border: Some(border),
            border_radius: Some("8px".to_string()),
            padding: Some("10px 14px".to_string()),
            min_width: Some("150px".to_string()),
        }
    }

    /// Canonical style for `kind` merged with caller overrides; the
    /// overrides win on conflicting fields.
    pub fn compute(
        kind: &NodeKind,
        overrides: Option<&NodeStyle>,
    ) -> Self {
        let base = Self::for_kind(kind);
        match overrides {
            Some(overrides) => base.overlaid(overrides),
            None => base,
        }
    }

    /// Returns this style with every field `overrides` sets taking
    /// precedence.
    pub fn overlaid(
        &self,
        overrides: &NodeStyle,
    ) -> Self {
        fn pick(
            base: &Option<String>,
            over: &Option<String>,
        ) -> Option<String> {
            over.clone().or_else(|| base.clone())
        }

        Self {
            background: pick(&self.background, &overrides.background),
            color: pick(&self.color, &overrides.color),
            border: pick(&self.border, &overrides.border),
            border_radius: pick(&self.border_radius, &overrides.border_radius),
            padding: pick(&self.padding, &overrides.padding),
            min_width: pick(&self.min_width, &overrides.min_width),
        }
    }

    /// Re-applies the canonical theme for `kind` over this style.
    ///
    /// Stored and AI-supplied graphs are not trusted to respect the styling
    /// invariant, so here the canonical fields win and the carried style
    /// only fills in what the theme does not define.
    pub fn rethemed(
        &self,
        kind: &NodeKind,
    ) -> Self {
        self.overlaid(&Self::for_kind(kind))
    }
}
