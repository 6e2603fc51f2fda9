//! Active-character bookkeeping across an owner's characters.

use crate::aggregates::Character;
use crate::value_objects::CharacterName;

/// Make `name` the single active character among `characters`.
///
/// Returns the names whose active flag changed, or `None` when `name` is not
/// among them (nothing changes). All characters are expected to share an owner.
pub fn promote(characters: &mut [Character], name: &CharacterName) -> Option<Vec<CharacterName>> {
    if !characters.iter().any(|c| c.name() == name) {
        return None;
    }
    let mut changed = Vec::new();
    for character in characters.iter_mut() {
        let active = character.name() == name;
        if character.is_active() != active {
            character.set_active(active);
            changed.push(character.name().clone());
        }
    }
    Some(changed)
}

/// The owner's active character, if any.
pub fn active(characters: &[Character]) -> Option<&Character> {
    characters.iter().find(|c| c.is_active())
}
