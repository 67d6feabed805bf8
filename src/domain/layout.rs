//! Per-floor bay grid shown when picking a slot.

pub const FLOORS: [u8; 2] = [1, 2];
pub const ROWS: [char; 3] = ['A', 'B', 'C'];
pub const COLUMNS: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    // ---
    pub id: String,
    pub floor: u8,
    pub row: char,
    pub column: u8,
    pub occupied: bool,
}

/// Slot id in the `{floor}-{row}{column}` form, e.g. `1-A3`.
pub fn slot_id(floor: u8, row: char, column: u8) -> String {
    // ---
    format!("{floor}-{row}{column}")
}

/// Occupancy is a fixed function of the id: the code points of the first
/// and fourth characters summed, modulo 3.
pub fn is_occupied(id: &str) -> bool {
    // ---
    let bytes = id.as_bytes();
    match (bytes.first(), bytes.get(3)) {
        (Some(a), Some(b)) => (*a as u32 + *b as u32) % 3 == 0,
        _ => false,
    }
}

/// All slots of `floor`, row by row.
pub fn floor_grid(floor: u8) -> Vec<Slot> {
    // ---
    ROWS.iter()
        .flat_map(|&row| {
            (1..=COLUMNS).map(move |column| {
                let id = slot_id(floor, row, column);
                Slot {
                    occupied: is_occupied(&id),
                    id,
                    floor,
                    row,
                    column,
                }
            })
        })
        .collect()
}

/// True when `id` names a slot on a known floor that can be picked.
pub fn is_selectable(id: &str) -> bool {
    // ---
    FLOORS
        .iter()
        .flat_map(|&floor| floor_grid(floor))
        .any(|slot| slot.id == id && !slot.occupied)
}
