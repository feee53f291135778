//! Carried items and the equip table.

use std::collections::BTreeMap;

use super::career::{ArmorClasses, Materials, Shields, Skill};

/// Stable handle of an item inside one agent's inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemUid(pub u32);

/// Metal or hide an item is made from.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Material {
    #[default]
    Iron,
    Steel,
    Silver,
    Elven,
    Dwarven,
    Mithril,
    Adamantium,
    Ebony,
    Orcish,
    Daedric,
}

impl Material {
    /// Tiers in ascending order.
    pub const ALL: [Material; 10] = [
        Material::Iron,
        Material::Steel,
        Material::Silver,
        Material::Elven,
        Material::Dwarven,
        Material::Mithril,
        Material::Adamantium,
        Material::Ebony,
        Material::Orcish,
        Material::Daedric,
    ];

    pub fn flag(self) -> Materials {
        match self {
            Material::Iron => Materials::IRON,
            Material::Steel => Materials::STEEL,
            Material::Silver => Materials::SILVER,
            Material::Elven => Materials::ELVEN,
            Material::Dwarven => Materials::DWARVEN,
            Material::Mithril => Materials::MITHRIL,
            Material::Adamantium => Materials::ADAMANTIUM,
            Material::Ebony => Materials::EBONY,
            Material::Orcish => Materials::ORCISH,
            Material::Daedric => Materials::DAEDRIC,
        }
    }

    /// To-hit/damage modifier a weapon of this material grants.
    pub fn weapon_modifier(self) -> i32 {
        match self {
            Material::Iron => -1,
            Material::Steel | Material::Silver => 0,
            Material::Elven => 1,
            Material::Dwarven => 2,
            Material::Mithril | Material::Adamantium => 3,
            Material::Ebony => 4,
            Material::Orcish => 5,
            Material::Daedric => 6,
        }
    }

    /// Protection of a plate piece made of this material.
    pub fn plate_armor_value(self) -> i32 {
        match self {
            Material::Iron => 7,
            Material::Steel | Material::Silver => 9,
            Material::Elven => 11,
            Material::Dwarven | Material::Mithril | Material::Adamantium => 13,
            Material::Ebony => 15,
            Material::Orcish => 17,
            Material::Daedric => 19,
        }
    }
}

/// Leather, chain or plate.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ArmorClass {
    Leather,
    Chain,
    Plate,
}

impl ArmorClass {
    pub fn flag(self) -> ArmorClasses {
        match self {
            ArmorClass::Leather => ArmorClasses::LEATHER,
            ArmorClass::Chain => ArmorClasses::CHAIN,
            ArmorClass::Plate => ArmorClasses::PLATE,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ShieldShape {
    Buckler,
    Round,
    Kite,
    Tower,
}

impl ShieldShape {
    pub fn flag(self) -> Shields {
        match self {
            ShieldShape::Buckler => Shields::BUCKLER,
            ShieldShape::Round => Shields::ROUND,
            ShieldShape::Kite => Shields::KITE,
            ShieldShape::Tower => Shields::TOWER,
        }
    }

    pub fn armor_value(self) -> i32 {
        match self {
            ShieldShape::Buckler => 1,
            ShieldShape::Round => 2,
            ShieldShape::Kite => 3,
            ShieldShape::Tower => 4,
        }
    }
}

/// Equip table slots.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EquipSlot {
    Head,
    Chest,
    Legs,
    Feet,
    Gloves,
    LeftArm,
    RightArm,
    LeftHand,
    RightHand,
    Amulet,
    Ring,
}

impl EquipSlot {
    /// Slots whose armor contributes to noise.
    pub const ARMOR: [EquipSlot; 7] = [
        EquipSlot::Chest,
        EquipSlot::Feet,
        EquipSlot::Gloves,
        EquipSlot::Head,
        EquipSlot::LeftArm,
        EquipSlot::Legs,
        EquipSlot::RightArm,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hands {
    One,
    Both,
}

/// What an item is, with the data each kind needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Weapon { skill: Skill, hands: Hands },
    /// Ammunition; never equipped.
    Arrow,
    Armor { slot: EquipSlot, class: ArmorClass },
    Shield { shape: ShieldShape },
    /// Rings, amulets and other wearables with no combat value of their own.
    Accessory { slot: EquipSlot },
    /// Anything that cannot be worn.
    Misc,
}

/// A carried item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub material: Material,
    /// Remaining durability, 0 means broken.
    pub condition: u32,
    pub enchanted: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind, material: Material) -> Self {
        Self {
            name: name.into(),
            kind,
            material,
            condition: 100,
            enchanted: false,
        }
    }

    pub fn enchanted(mut self) -> Self {
        self.enchanted = true;
        self
    }

    pub fn with_condition(mut self, condition: u32) -> Self {
        self.condition = condition;
        self
    }

    pub fn weapon_skill(&self) -> Option<Skill> {
        match self.kind {
            ItemKind::Weapon { skill, .. } => Some(skill),
            _ => None,
        }
    }

    pub fn is_archery(&self) -> bool {
        self.weapon_skill() == Some(Skill::Archery)
    }

    pub fn is_two_handed(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Weapon {
                hands: Hands::Both,
                ..
            }
        )
    }

    pub fn is_leather(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Armor {
                class: ArmorClass::Leather,
                ..
            }
        )
    }

    pub fn is_body_armor(&self) -> bool {
        matches!(self.kind, ItemKind::Armor { .. })
    }
}

/// An agent's carried items plus which of them are worn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    items: BTreeMap<ItemUid, Item>,
    equipped: BTreeMap<EquipSlot, ItemUid>,
    next_uid: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Item) -> ItemUid {
        let uid = ItemUid(self.next_uid);
        self.next_uid += 1;
        self.items.insert(uid, item);
        uid
    }

    /// Adds an item and wears it in `slot`.
    pub fn add_equipped(&mut self, item: Item, slot: EquipSlot) -> ItemUid {
        let uid = self.add(item);
        self.equipped.insert(slot, uid);
        uid
    }

    pub fn get(&self, uid: ItemUid) -> Option<&Item> {
        self.items.get(&uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemUid, &Item)> {
        self.items.iter().map(|(uid, item)| (*uid, item))
    }

    pub fn uids(&self) -> Vec<ItemUid> {
        self.items.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item worn in `slot`, if any.
    pub fn equipped_in(&self, slot: EquipSlot) -> Option<&Item> {
        self.equipped.get(&slot).and_then(|uid| self.items.get(uid))
    }

    pub fn is_equipped(&self, uid: ItemUid) -> bool {
        self.equipped.values().any(|u| *u == uid)
    }

    pub fn slot_of(&self, uid: ItemUid) -> Option<EquipSlot> {
        self.equipped
            .iter()
            .find_map(|(slot, u)| (*u == uid).then_some(*slot))
    }

    /// Wears `uid` in `slot`, replacing whatever was there.
    pub fn equip(&mut self, uid: ItemUid, slot: EquipSlot) {
        if self.items.contains_key(&uid) {
            self.equipped.retain(|_, u| *u != uid);
            self.equipped.insert(slot, uid);
        }
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<ItemUid> {
        self.equipped.remove(&slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equip_moves_item_between_slots() {
        let mut inv = Inventory::new();
        let ring = inv.add(Item::new(
            "ring",
            ItemKind::Accessory {
                slot: EquipSlot::Ring,
            },
            Material::Silver,
        ));
        inv.equip(ring, EquipSlot::Ring);
        inv.equip(ring, EquipSlot::Amulet);
        assert_eq!(inv.slot_of(ring), Some(EquipSlot::Amulet));
        assert!(inv.equipped_in(EquipSlot::Ring).is_none());
        assert_eq!(inv.unequip(EquipSlot::Amulet), Some(ring));
        assert!(!inv.is_equipped(ring));
    }
}
