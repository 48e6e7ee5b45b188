//! Keybinding dispatcher for git-recover.
//!
//! Translates raw crossterm `KeyEvent`s into `SessionState` mutations and returns a
//! `KeyAction` telling the event loop whether to continue or quit. The dispatcher
//! branches first on the session phase so each phase has an isolated handler.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Phase, SessionState};

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Keep running and redraw.
    Continue,
    /// Restore the terminal and exit.
    Quit,
}

/// Dispatches a key event to the handler matching the current phase.
pub fn handle_key(key: KeyEvent, state: &mut SessionState) -> KeyAction {
    match state.phase {
        Phase::Browsing => handle_browsing(key, state),
        Phase::NamingBranch { .. } => handle_naming(key, state),
        Phase::Recovering { .. } => KeyAction::Continue,
        Phase::Succeeded { .. } | Phase::Failed { .. } => KeyAction::Quit,
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

// ---------------------------------------------------------------------------
// Browsing
// ---------------------------------------------------------------------------

fn handle_browsing(key: KeyEvent, state: &mut SessionState) -> KeyAction {
    if is_ctrl(&key, 'c') {
        return KeyAction::Quit;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::PageUp => state.scroll_preview_up(),
        KeyCode::PageDown => state.scroll_preview_down(),
        KeyCode::Enter => state.begin_naming(),
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// NamingBranch
// ---------------------------------------------------------------------------

/// Line editing for the branch-name prompt.
///
/// Every printable character is text here, including `q`, `j` and `k`.
fn handle_naming(key: KeyEvent, state: &mut SessionState) -> KeyAction {
    if is_ctrl(&key, 'c') {
        return KeyAction::Quit;
    }
    match key.code {
        KeyCode::Esc => {
            state.cancel_naming();
            return KeyAction::Continue;
        }
        KeyCode::Enter => {
            state.confirm_branch();
            return KeyAction::Continue;
        }
        _ => {}
    }

    let Some(input) = state.name_input_mut() else {
        return KeyAction::Continue;
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('a') => input.move_home(),
            KeyCode::Char('e') => input.move_end(),
            KeyCode::Char('u') => input.delete_to_start(),
            KeyCode::Char('k') => input.delete_to_end(),
            KeyCode::Char('w') => input.delete_word_back(),
            _ => {}
        }
        return KeyAction::Continue;
    }

    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::session;
    use crate::git::types::{GitRequest, GitResult};
    use git_recover_core::RecoveryError;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn name(state: &SessionState) -> &str {
        match &state.phase {
            Phase::NamingBranch { input } => input.value(),
            other => panic!("not naming: {other:?}"),
        }
    }

    #[test]
    fn browsing_quit_keys() {
        for key in [press(KeyCode::Char('q')), press(KeyCode::Esc), ctrl('c')] {
            let (mut state, _rx) = session(&["a"]);
            assert_eq!(handle_key(key, &mut state), KeyAction::Quit);
        }
    }

    #[test]
    fn vim_and_arrow_keys_move_cursor() {
        let (mut state, _rx) = session(&["a", "b", "c"]);
        handle_key(press(KeyCode::Char('j')), &mut state);
        handle_key(press(KeyCode::Down), &mut state);
        assert_eq!(state.cursor(), 2);
        handle_key(press(KeyCode::Char('k')), &mut state);
        assert_eq!(state.cursor(), 1);
        handle_key(press(KeyCode::Up), &mut state);
        handle_key(press(KeyCode::Up), &mut state);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn navigation_letters_are_text_while_naming() {
        let (mut state, _rx) = session(&["aaa1111deadbeef"]);
        handle_key(press(KeyCode::Enter), &mut state);
        for c in ['q', 'j', 'k'] {
            assert_eq!(handle_key(press(KeyCode::Char(c)), &mut state), KeyAction::Continue);
        }
        assert_eq!(name(&state), "recovered-aaa1111qjk");
    }

    #[test]
    fn naming_editing_keys() {
        let (mut state, _rx) = session(&["aaa1111deadbeef"]);
        handle_key(press(KeyCode::Enter), &mut state);

        handle_key(ctrl('w'), &mut state);
        assert_eq!(name(&state), "");
        for c in "fix/it".chars() {
            handle_key(press(KeyCode::Char(c)), &mut state);
        }
        handle_key(press(KeyCode::Backspace), &mut state);
        handle_key(ctrl('a'), &mut state);
        handle_key(press(KeyCode::Delete), &mut state);
        assert_eq!(name(&state), "ix/i");
        handle_key(press(KeyCode::Right), &mut state);
        handle_key(ctrl('k'), &mut state);
        assert_eq!(name(&state), "i");
        handle_key(ctrl('e'), &mut state);
        handle_key(press(KeyCode::Char('t')), &mut state);
        handle_key(ctrl('u'), &mut state);
        assert_eq!(name(&state), "");
    }

    #[test]
    fn esc_while_naming_returns_to_browsing() {
        let (mut state, _rx) = session(&["a"]);
        handle_key(press(KeyCode::Enter), &mut state);
        assert_eq!(handle_key(press(KeyCode::Esc), &mut state), KeyAction::Continue);
        assert_eq!(state.phase, Phase::Browsing);
    }

    #[test]
    fn ctrl_c_while_naming_quits() {
        let (mut state, _rx) = session(&["a"]);
        handle_key(press(KeyCode::Enter), &mut state);
        assert_eq!(handle_key(ctrl('c'), &mut state), KeyAction::Quit);
    }

    #[test]
    fn type_and_confirm_sends_one_create_branch() {
        let (mut state, rx) = session(&["aaa1111deadbeefcafe"]);
        let _initial_preview: Vec<_> = rx.try_iter().collect();

        handle_key(press(KeyCode::Enter), &mut state);
        handle_key(press(KeyCode::Char('x')), &mut state);
        handle_key(press(KeyCode::Enter), &mut state);
        // Further keys while recovering are ignored.
        handle_key(press(KeyCode::Enter), &mut state);
        handle_key(press(KeyCode::Char('q')), &mut state);

        let sent: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            sent,
            vec![GitRequest::CreateBranch {
                hash: "aaa1111deadbeefcafe".to_owned(),
                name: "recovered-aaa1111x".to_owned(),
            }]
        );
        assert_eq!(
            state.phase,
            Phase::Recovering { branch: "recovered-aaa1111x".to_owned() }
        );
    }

    #[test]
    fn any_key_quits_terminal_phases() {
        let (mut state, _rx) = session(&["aaa1111deadbeef"]);
        handle_key(press(KeyCode::Enter), &mut state);
        handle_key(press(KeyCode::Enter), &mut state);
        state.apply_git_result(GitResult::BranchCreated {
            name: "recovered-aaa1111".to_owned(),
            result: Err(RecoveryError::BranchCreationFailed { reason: "boom".to_owned() }),
        });
        assert_eq!(handle_key(press(KeyCode::Char('z')), &mut state), KeyAction::Quit);
    }
}
