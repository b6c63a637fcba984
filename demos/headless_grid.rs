//! Example: Driving the grid state without a terminal
//!
//! Sorting and selection live in [`GridState`], not in the widget, so the
//! whole pipeline can run headless. This example walks the sort cycle and
//! key-based selection over the sample rows and prints the view after each
//! step.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example headless_grid
//! ```

use gridfield::data::{filter_users, sample_users, User};
use gridfield::grid::{Column, GridState, KeyStrategy};

fn print_view(
    label: &str,
    state: &GridState,
    users: &[User],
    columns: &[Column<User>],
    keys: &KeyStrategy<User>,
) {
    println!("{}:", label);
    for (original_index, user) in state.sorted_view(users, columns) {
        let mark = if state.is_selected(users, keys, original_index) {
            "[x]"
        } else {
            "[ ]"
        };
        println!(
            "  {} {:10} {}",
            mark,
            user.name,
            user.last_login.as_deref().unwrap_or("-")
        );
    }
    println!();
}

fn main() {
    let users = sample_users();
    let columns = vec![
        Column::new("id", "ID", |u: &User| u.id.into()).sortable(),
        Column::new("name", "Name", |u: &User| u.name.as_str().into()).sortable(),
        Column::new("last_login", "Last seen", |u: &User| {
            u.last_login.clone().into()
        })
        .sortable(),
    ];
    let keys = KeyStrategy::field(|u: &User| u.id.into());

    let mut state = GridState::new();
    print_view("Unsorted (source order)", &state, &users, &columns, &keys);

    // The sort cycle on one column: ascending, descending, cleared.
    state.sort_cycle(&columns, "name");
    print_view("Sorted by name, ascending", &state, &users, &columns, &keys);

    state.sort_cycle(&columns, "name");
    print_view("Sorted by name, descending", &state, &users, &columns, &keys);

    state.sort_cycle(&columns, "name");
    print_view("Sort cleared (source order again)", &state, &users, &columns, &keys);

    // Rows that never signed in sort before every dated row.
    state.sort_cycle(&columns, "last_login");
    print_view("Sorted by last seen (blank first)", &state, &users, &columns, &keys);

    // Selection is keyed by row identity, so it survives filtering.
    state.toggle_row(&users, &keys, 0);
    state.toggle_row(&users, &keys, 3);
    println!(
        "Selected {} of {} rows",
        state.selected_count(&users, &keys),
        users.len()
    );

    let filtered = filter_users(&users, "a");
    println!(
        "After filtering to {} rows: {} selections visible, {} keys held",
        filtered.len(),
        state.selected_count(&filtered, &keys),
        state.selected.len()
    );

    print_view("Filtered view", &state, &filtered, &columns, &keys);
}
