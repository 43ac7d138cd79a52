use crate::action::Action;

pub(super) fn reduce(state: bool, action: &Action) -> bool {
    match action {
        Action::StartLoading => true,
        Action::StopLoading => false,
        _ => state,
    }
}
