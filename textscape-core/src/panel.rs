/// Panel flow for the staged visualization session
///
/// The session walks a fixed sequence: enter the source text, enter the
/// search terms, trigger the visualization, then control the camera.
/// Transitions are forward-only; restarting means a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStage {
    #[default]
    SourceText,
    SearchTerms,
    Visualize,
    CameraControl,
}

impl PanelStage {
    /// The stage that follows this one. The final stage is absorbing.
    pub fn advance(self) -> Self {
        match self {
            Self::SourceText => Self::SearchTerms,
            Self::SearchTerms => Self::Visualize,
            Self::Visualize => Self::CameraControl,
            Self::CameraControl => Self::CameraControl,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::CameraControl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_advance_in_order_and_stop() {
        let mut stage = PanelStage::default();
        assert_eq!(stage, PanelStage::SourceText);

        stage = stage.advance();
        assert_eq!(stage, PanelStage::SearchTerms);
        stage = stage.advance();
        assert_eq!(stage, PanelStage::Visualize);
        stage = stage.advance();
        assert_eq!(stage, PanelStage::CameraControl);
        assert!(stage.is_terminal());

        // Absorbing final stage
        assert_eq!(stage.advance(), PanelStage::CameraControl);
    }

    #[test]
    fn test_only_the_last_stage_is_terminal() {
        assert!(!PanelStage::SourceText.is_terminal());
        assert!(!PanelStage::SearchTerms.is_terminal());
        assert!(!PanelStage::Visualize.is_terminal());
    }
}
