//! Test Fixtures
//!
//! Builders for catalog records shaped like the service's responses.

use crate::core::catalog::models::{
    AbilitySlot, ArtworkSprite, NamedResource, OtherSprites, Sprites, StatValue, TypeSlot,
};
use crate::core::catalog::{EntryDetail, ListEntry, ListPage, TypeEntry};

const API: &str = "https://pokeapi.co/api/v2";

fn resource(kind: &str, name: &str, id: u32) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: format!("{API}/{kind}/{id}/"),
    }
}

/// A list entry whose reference carries `id`.
pub fn entry(id: u32, name: &str) -> ListEntry {
    ListEntry::new(name, format!("{API}/pokemon/{id}/"))
}

/// Entries numbered from 1 in the given order.
pub fn entries(names: &[&str]) -> Vec<ListEntry> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| entry(i as u32 + 1, name))
        .collect()
}

/// `count` generated entries, `mon-1` to `mon-{count}`.
pub fn numbered_entries(count: u32) -> Vec<ListEntry> {
    (1..=count).map(|id| entry(id, &format!("mon-{id}"))).collect()
}

pub fn page(count: u64, results: Vec<ListEntry>) -> ListPage {
    ListPage {
        count,
        next: None,
        previous: None,
        results,
    }
}

pub fn type_entries(names: &[&str]) -> Vec<TypeEntry> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| TypeEntry {
            name: name.to_string(),
            url: format!("{API}/type/{}/", i + 1),
        })
        .collect()
}

/// A full detail record with a single "normal" type and a plain stat line.
pub fn detail(id: u32, name: &str) -> EntryDetail {
    detail_with_types(id, name, &["normal"])
}

pub fn detail_with_types(id: u32, name: &str, types: &[&str]) -> EntryDetail {
    let stats = [
        ("hp", 35),
        ("attack", 55),
        ("defense", 40),
        ("special-attack", 50),
        ("special-defense", 50),
        ("speed", 90),
    ];
    EntryDetail {
        id,
        name: name.to_string(),
        height: 4,
        weight: 60,
        sprites: Sprites {
            front_default: None,
            other: OtherSprites {
                official_artwork: ArtworkSprite {
                    front_default: Some(format!("https://img.example/artwork/{id}.png")),
                },
                dream_world: ArtworkSprite::default(),
            },
        },
        types: types
            .iter()
            .enumerate()
            .map(|(i, t)| TypeSlot {
                slot: i as u8 + 1,
                kind: resource("type", t, i as u32 + 1),
            })
            .collect(),
        stats: stats
            .iter()
            .enumerate()
            .map(|(i, (stat, value))| StatValue {
                base_stat: *value,
                effort: 0,
                stat: resource("stat", stat, i as u32 + 1),
            })
            .collect(),
        abilities: vec![AbilitySlot {
            ability: resource("ability", "static", 9),
            is_hidden: false,
        }],
    }
}
