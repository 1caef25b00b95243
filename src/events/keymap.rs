/// What a key press asks the page to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    SkipIntro,
    EnterPortal,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "Escape" | "Esc" => Some(KeyAction::SkipIntro),
        "Enter" => Some(KeyAction::EnterPortal),
        _ => None,
    }
}

/// Key repeat and typing into form fields never trigger page actions.
#[inline]
pub fn should_handle(repeat: bool, target_tag: Option<&str>) -> bool {
    if repeat {
        return false;
    }
    !matches!(
        target_tag.map(|t| t.to_ascii_uppercase()).as_deref(),
        Some("INPUT") | Some("TEXTAREA") | Some("SELECT")
    )
}
