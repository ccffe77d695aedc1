use maze_chase_rendering_macroquad::MenuInputState;

fn run_new_game_sequence(sequence: &[bool]) -> Vec<bool> {
    let mut state = MenuInputState::default();
    let mut presses = Vec::new();
    for &pressed in sequence {
        presses.push(state.take_start_new_game());
        if pressed {
            state.register_start_new_game();
        }
    }

    // Flush the trailing latch so the final press is observed.
    presses.push(state.take_start_new_game());
    presses
}

fn run_continue_sequence(sequence: &[bool]) -> Vec<bool> {
    let mut state = MenuInputState::default();
    let mut presses = Vec::new();
    for &pressed in sequence {
        presses.push(state.take_continue_game());
        if pressed {
            state.register_continue_game();
        }
    }
    presses.push(state.take_continue_game());
    presses
}

#[test]
fn new_game_button_sequence_is_deterministic() {
    let button_sequence = [false, true, false, true, true, false];
    let expected = vec![false, false, true, false, true, true, false];

    let first_run = run_new_game_sequence(&button_sequence);
    let second_run = run_new_game_sequence(&button_sequence);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn continue_button_sequence_is_deterministic() {
    let button_sequence = [true, false, true, false, false, true];
    let expected = vec![false, true, false, true, false, false, true];

    let first_run = run_continue_sequence(&button_sequence);
    let second_run = run_continue_sequence(&button_sequence);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn latches_are_independent() {
    let mut state = MenuInputState::default();
    state.register_continue_game();

    assert!(!state.take_start_new_game());
    assert!(state.take_continue_game());
    assert!(!state.take_continue_game());
}
