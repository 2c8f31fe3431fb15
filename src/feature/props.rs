use crate::foundation::error::{WavyteError, WavyteResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Axes a draggable element may move along.
pub enum DragAxis {
    /// Free drag.
    Both,
    /// Horizontal only.
    X,
    /// Vertical only.
    Y,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Motion configuration of one visual element, as far as layout measurement cares.
///
/// JSON shape: `{"drag": true | false | "x" | "y" | "both" | null, "layout": bool, "layout_id": string | null}`,
/// every field optional.
pub struct MotionProps {
    /// Drag interaction. `true` in JSON means [`DragAxis::Both`], `false` means disabled.
    #[serde(default, deserialize_with = "deserialize_drag")]
    pub drag: Option<DragAxis>,
    /// Animate this element's own layout changes.
    #[serde(default)]
    pub layout: bool,
    /// Shared layout identity. An empty string is the same as no identity.
    #[serde(default)]
    pub layout_id: Option<String>,
}

impl MotionProps {
    /// Parse and validate props from JSON.
    pub fn from_json(s: &str) -> WavyteResult<Self> {
        let props: Self = serde_json::from_str(s)?;
        props.validate()?;
        Ok(props)
    }

    /// Reject a `layout_id` made only of whitespace.
    pub fn validate(&self) -> WavyteResult<()> {
        if let Some(id) = &self.layout_id
            && !id.is_empty()
            && id.trim().is_empty()
        {
            return Err(WavyteError::validation(
                "layout_id must not be whitespace-only",
            ));
        }
        Ok(())
    }

    /// `true` if a non-empty layout identity is assigned.
    pub fn has_layout_id(&self) -> bool {
        self.layout_id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// Activation predicate: does this element need a measurement unit at all?
///
/// True when drag is enabled, layout animation is enabled, or a layout identity is assigned.
pub fn should_measure(props: &MotionProps) -> bool {
    props.drag.is_some() || props.layout || props.has_layout_id()
}

fn deserialize_drag<'de, D>(deserializer: D) -> Result<Option<DragAxis>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum DragRepr {
        Flag(bool),
        Axis(DragAxis),
    }

    let repr = <Option<DragRepr> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(match repr {
        None | Some(DragRepr::Flag(false)) => None,
        Some(DragRepr::Flag(true)) => Some(DragAxis::Both),
        Some(DragRepr::Axis(axis)) => Some(axis),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/feature/props.rs"]
mod tests;
