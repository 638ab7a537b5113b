//! Container slot regions and container window types.
//!
//! A Bedrock slot is addressed by a region tag ([`ContainerSlotType`], called
//! "container name" on the wire) plus an offset inside that region. Opening a
//! window declares a [`ContainerType`] so the client picks the right UI.

use bytes::BufMut;
use serde::{Deserialize, Serialize};

use crate::codec::ProtoEncode;

macro_rules! slot_types {
    ($($name:ident = $id:literal),* $(,)?) => {
        /// Structural slot region of a Bedrock UI.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ContainerSlotType {
            $($name,)*
            /// A region id this bridge does not know about.
            Unknown(u8),
        }

        impl ContainerSlotType {
            pub fn from_id(id: u8) -> Self {
                match id {
                    $($id => Self::$name,)*
                    other => Self::Unknown(other),
                }
            }

            pub fn id(self) -> u8 {
                match self {
                    $(Self::$name => $id,)*
                    Self::Unknown(other) => other,
                }
            }
        }
    };
}

slot_types! {
    AnvilInput = 0,
    AnvilMaterial = 1,
    AnvilResult = 2,
    SmithingTableInput = 3,
    SmithingTableMaterial = 4,
    SmithingTableResult = 5,
    Armor = 6,
    LevelEntity = 7,
    BeaconPayment = 8,
    BrewingInput = 9,
    BrewingResult = 10,
    BrewingFuel = 11,
    HotbarAndInventory = 12,
    CraftingInput = 13,
    CraftingOutput = 14,
    EnchantingInput = 22,
    EnchantingMaterial = 23,
    FurnaceFuel = 24,
    FurnaceIngredient = 25,
    FurnaceResult = 26,
    Hotbar = 28,
    Inventory = 29,
    ShulkerBox = 30,
    Offhand = 34,
    LoomInput = 41,
    LoomDye = 42,
    LoomMaterial = 43,
    LoomResult = 44,
    GrindstoneInput = 50,
    GrindstoneAdditional = 51,
    GrindstoneResult = 52,
    StonecutterInput = 53,
    StonecutterResult = 54,
    CartographyInput = 55,
    CartographyAdditional = 56,
    CartographyResult = 57,
    Barrel = 58,
    Cursor = 59,
    CreatedOutput = 60,
}

impl ContainerSlotType {
    /// Whether this region addresses the player's own 36 inventory slots.
    pub fn is_player_inventory(self) -> bool {
        matches!(
            self,
            Self::Hotbar | Self::Inventory | Self::HotbarAndInventory
        )
    }
}

/// Slot region plus the optional dynamic container id (bundles) that
/// inventory packets carry to say which region their items belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FullContainerName {
    pub container: ContainerSlotType,
    pub dynamic_id: Option<u32>,
}

impl FullContainerName {
    pub fn new(container: ContainerSlotType) -> Self {
        Self {
            container,
            dynamic_id: None,
        }
    }
}

impl ProtoEncode for FullContainerName {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.container.id());
        match self.dynamic_id {
            Some(id) => {
                buf.put_u8(1);
                buf.put_u32_le(id);
            }
            None => buf.put_u8(0),
        }
    }
}

/// Bedrock container window type sent in `ContainerOpen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum ContainerType {
    Inventory = -1,
    Container = 0,
    Workbench = 1,
    Furnace = 2,
    Enchantment = 3,
    BrewingStand = 4,
    Anvil = 5,
    Dispenser = 6,
    Dropper = 7,
    Hopper = 8,
    Loom = 24,
    Grindstone = 26,
    BlastFurnace = 27,
    Smoker = 28,
    Stonecutter = 29,
    Cartography = 30,
    SmithingTable = 33,
}

impl ContainerType {
    pub fn id(self) -> i8 {
        self as i8
    }
}

/// Reserved Bedrock window ids.
pub mod window_id {
    pub const INVENTORY: u32 = 0;
    pub const OFFHAND: u32 = 119;
    pub const ARMOR: u32 = 120;
    /// The unified UI container holding cursor, crafting and cutter slots.
    pub const UI: u32 = 124;
}

/// Fixed Bedrock slot offsets inside the unified UI container.
pub mod ui_slot {
    /// The cursor lives in the UI container at offset 0.
    pub const CURSOR: u8 = 0;
    pub const STONECUTTER_INPUT: u8 = 3;
    /// First slot of the 3×3 crafting grid.
    pub const CRAFTING_INPUT_START: u8 = 32;
    /// Shared result slot for crafting-like UIs.
    pub const CREATED_OUTPUT: u8 = 50;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn container_name_encoding() {
        let mut buf = BytesMut::new();
        FullContainerName::new(ContainerSlotType::Cursor).proto_encode(&mut buf);
        assert_eq!(&buf[..], &[59, 0]);

        let mut buf = BytesMut::new();
        let bundle = FullContainerName {
            container: ContainerSlotType::Unknown(63),
            dynamic_id: Some(2),
        };
        bundle.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[63, 1, 2, 0, 0, 0]);
    }

    #[test]
    fn slot_type_ids_are_stable() {
        assert_eq!(ContainerSlotType::LevelEntity.id(), 7);
        assert_eq!(ContainerSlotType::StonecutterInput.id(), 53);
        assert_eq!(ContainerSlotType::StonecutterResult.id(), 54);
        assert_eq!(ContainerSlotType::Barrel.id(), 58);
        assert_eq!(ContainerSlotType::Cursor.id(), 59);
        assert_eq!(ContainerSlotType::CreatedOutput.id(), 60);
    }

    #[test]
    fn unknown_slot_type_keeps_its_id() {
        let unknown = ContainerSlotType::from_id(200);
        assert_eq!(unknown, ContainerSlotType::Unknown(200));
        assert_eq!(unknown.id(), 200);
    }

    #[test]
    fn from_id_inverts_id() {
        for id in 0..=60u8 {
            assert_eq!(ContainerSlotType::from_id(id).id(), id);
        }
    }

    #[test]
    fn player_inventory_regions() {
        assert!(ContainerSlotType::Hotbar.is_player_inventory());
        assert!(ContainerSlotType::HotbarAndInventory.is_player_inventory());
        assert!(!ContainerSlotType::Cursor.is_player_inventory());
        assert!(!ContainerSlotType::LevelEntity.is_player_inventory());
    }

    #[test]
    fn container_type_ids() {
        assert_eq!(ContainerType::Container.id(), 0);
        assert_eq!(ContainerType::Workbench.id(), 1);
        assert_eq!(ContainerType::Stonecutter.id(), 29);
        assert_eq!(ContainerType::Inventory.id(), -1);
    }
}
