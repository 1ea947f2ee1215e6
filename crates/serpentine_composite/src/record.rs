//! Composite topology in monster property records.
//!
//! Live composites hold entity slots, which do not survive a save. Before
//! saving, each composite writes its shape into its members' records under
//! [`DATA_KEY`], keyed by persistent [`Mid`]s; after loading, the head's
//! record is enough to rebuild it.
//!
//! Head record:
//!
//! | key | value |
//! |-----|-------|
//! | [`TYPE_KEY`] | kind tag, e.g. [`LINE_KIND`] |
//! | [`ROLE_KEY`] | [`ROLE_HEAD`] |
//! | [`HEAD_KEY`] | the head's own mid |
//! | [`PARTS_KEY`] | part mids, in kind order |
//!
//! Part records carry the same kind tag, [`ROLE_PART`], and the head mid.
//! Kinds may add fields of their own, such as [`LINE_LENGTH_KEY`].

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serpentine_foundation::{EntityId, Error, Mid, PropTable, Result};
use serpentine_storage::{Monster, World};

use crate::composite::{Composite, CompositeCore};

/// Top-level record key holding composite data.
pub const DATA_KEY: &str = "big_monster_data";
/// Kind tag.
pub const TYPE_KEY: &str = "big_monster_type";
/// Role tag: head or part.
pub const ROLE_KEY: &str = "big_monster_mons_type";
/// Part mids, head only.
pub const PARTS_KEY: &str = "big_monster_parts";
/// Head mid, on every member.
pub const HEAD_KEY: &str = "big_monster_head";
/// Line maximum length, head only.
pub const LINE_LENGTH_KEY: &str = "line_monster_length";

/// Role tag for the head.
pub const ROLE_HEAD: &str = "head";
/// Role tag for parts.
pub const ROLE_PART: &str = "part";

/// Kind tag of composites with no specific kind.
pub const UNKNOWN_KIND: &str = "unknown_monster";
/// Kind tag of line composites.
pub const LINE_KIND: &str = "line_monster";

/// Wraps a record error as corruption of `mid`'s `field`.
pub fn corrupt(mid: Mid, field: &'static str) -> impl FnOnce(Error) -> Error {
    move |err| Error::corrupt_composite(mid, field, err.kind.to_string())
}

/// The composite data table of `monster`.
///
/// # Errors
///
/// Returns an error if the monster has no composite data.
pub fn record_of(monster: &Monster) -> Result<&PropTable> {
    monster.props.get_table(DATA_KEY)
}

/// The composite data table of the live monster `id`.
///
/// # Errors
///
/// Returns an error if `id` is not live or has no composite data.
pub fn head_record(world: &World, id: EntityId) -> Result<&PropTable> {
    record_of(world.monster(id)?)
}

/// Mutable composite data table of `id`, created if absent.
///
/// # Errors
///
/// Returns an error if `id` is not live.
pub fn head_record_mut(world: &mut World, id: EntityId) -> Result<&mut PropTable> {
    Ok(world.monster_mut(id)?.props.table_mut(DATA_KEY))
}

/// Writes the fields shared by every kind onto head and parts.
///
/// # Errors
///
/// Returns an error if a member is not live.
pub fn write_base<C: Composite + ?Sized>(composite: &C, world: &mut World) -> Result<()> {
    let tag = composite.serialized_kind_tag();
    let head_mid = composite.head_mid().to_record();
    let part_mids = composite
        .parts()
        .iter()
        .map(|&p| world.mid(p).map(Mid::to_record))
        .collect::<Result<Vec<_>>>()?;

    let head = head_record_mut(world, composite.head())?;
    head.insert(TYPE_KEY, tag);
    head.insert(ROLE_KEY, ROLE_HEAD);
    head.insert(HEAD_KEY, head_mid);
    head.insert(PARTS_KEY, part_mids);

    for &part in composite.parts() {
        let data = head_record_mut(world, part)?;
        data.insert(TYPE_KEY, tag);
        data.insert(ROLE_KEY, ROLE_PART);
        data.insert(HEAD_KEY, head_mid);
        data.remove(PARTS_KEY);
    }
    Ok(())
}

/// Does `monster` carry a head record a composite can be loaded from?
#[must_use]
pub fn detect(monster: &Monster) -> bool {
    record_of(monster).is_ok_and(|data| {
        data.get_str(TYPE_KEY).is_ok() && data.get_str(ROLE_KEY).is_ok_and(|r| r == ROLE_HEAD)
    })
}

/// The kind tag stored on `monster`.
///
/// # Errors
///
/// Returns an error if the record or tag is missing.
pub fn kind_tag(monster: &Monster) -> Result<&str> {
    record_of(monster)
        .and_then(|data| data.get_str(TYPE_KEY))
        .map_err(corrupt(monster.mid, TYPE_KEY))
}

fn expect_tag(data: &PropTable, owner: Mid, key: &'static str, expected: &str) -> Result<()> {
    let found = data.get_str(key).map_err(corrupt(owner, key))?;
    if found == expected {
        Ok(())
    } else {
        Err(Error::corrupt_composite(
            owner,
            key,
            format!("expected '{expected}', found '{found}'"),
        ))
    }
}

fn expect_head(data: &PropTable, owner: Mid, head: Mid) -> Result<()> {
    let stored = data.get_int(HEAD_KEY).map_err(corrupt(owner, HEAD_KEY))?;
    if Mid::from_record(stored) == Some(head) {
        Ok(())
    } else {
        Err(Error::corrupt_composite(
            owner,
            HEAD_KEY,
            format!("points at {stored}, expected {head}"),
        ))
    }
}

/// Rebuilds the membership of the composite headed by `head`.
///
/// Checks the head's kind and role tags and its stored head mid, then
/// resolves every part mid to a live monster whose record agrees on kind,
/// role and head.
///
/// # Errors
///
/// Returns a corrupt composite error naming the offending monster and field.
pub fn load_core(world: &World, head: EntityId, kind: &str) -> Result<CompositeCore> {
    let monster = world.monster(head)?;
    let head_mid = monster.mid;
    let data = record_of(monster).map_err(corrupt(head_mid, DATA_KEY))?;

    expect_tag(data, head_mid, TYPE_KEY, kind)?;
    expect_tag(data, head_mid, ROLE_KEY, ROLE_HEAD)?;
    expect_head(data, head_mid, head_mid)?;

    let raw_parts = data.get_int_vec(PARTS_KEY).map_err(corrupt(head_mid, PARTS_KEY))?;
    let mut seen = BTreeSet::from([head_mid]);
    let mut parts = Vec::with_capacity(raw_parts.len());
    for &raw in raw_parts {
        let part_mid = Mid::from_record(raw).ok_or_else(|| {
            Error::corrupt_composite(head_mid, PARTS_KEY, format!("{raw} is not a monster id"))
        })?;
        if !seen.insert(part_mid) {
            return Err(Error::corrupt_composite(
                head_mid,
                PARTS_KEY,
                format!("{part_mid} listed twice"),
            ));
        }
        let part = world.monster_by_mid(part_mid).ok_or_else(|| {
            Error::corrupt_composite(head_mid, PARTS_KEY, format!("no live monster with {part_mid}"))
        })?;

        let part_data = head_record(world, part).map_err(corrupt(part_mid, DATA_KEY))?;
        expect_tag(part_data, part_mid, TYPE_KEY, kind)?;
        expect_tag(part_data, part_mid, ROLE_KEY, ROLE_PART)?;
        expect_head(part_data, part_mid, head_mid)?;
        parts.push(part);
    }

    Ok(CompositeCore::with_parts(head, head_mid, parts))
}

/// Debugging dump of `monster`'s composite record. Tolerates missing fields.
#[must_use]
pub fn describe_record(world: &World, monster: &Monster) -> String {
    let Ok(data) = record_of(monster) else {
        return format!("{} has no composite record.\n", monster.mid);
    };
    let mut s = String::new();
    let _ = writeln!(
        s,
        "{} kind '{}', role '{}'.",
        monster.mid,
        data.get_str(TYPE_KEY).unwrap_or("?"),
        data.get_str(ROLE_KEY).unwrap_or("?"),
    );
    if let Ok(parts) = data.get_int_vec(PARTS_KEY) {
        let listed: Vec<String> = parts.iter().map(i64::to_string).collect();
        let _ = writeln!(s, "Parts: [{}]", listed.join(", "));
    }
    match data.get_int(HEAD_KEY).ok().and_then(Mid::from_record) {
        Some(head) if head == monster.mid => {}
        Some(head) => match world.monster_by_mid(head).and_then(|id| world.get(id)) {
            Some(h) => {
                let _ = writeln!(s, "Head {head} is '{}' at {}.", h.name(), h.pos);
            }
            None => {
                let _ = writeln!(s, "Head {head} is not alive.");
            }
        },
        None => s.push_str("No head recorded.\n"),
    }
    s
}
