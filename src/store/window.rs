use crate::action::Action;

pub(super) fn reduce(state: bool, action: &Action) -> bool {
    match action {
        Action::WindowShown => true,
        Action::WindowHidden => false,
        _ => state,
    }
}
