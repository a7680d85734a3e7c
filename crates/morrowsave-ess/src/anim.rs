//! Animation group names, indexed by the `ANIS` group index.

#[rustfmt::skip]
pub static ANIMATION_GROUPS: [&str; 143] = [
    "Idle", "Idle2", "Idle3", "Idle4", "Idle5", "Idle6", "Idle7", "Idle8", "Idle9", "Idlehh",
    "Idle1h", "Idle2c", "Idle2w", "IdleSwim", "IdleSpell", "IdleCrossbow", "IdleSneak", "IdleStorm",
    "Torch", "Hit1", "Hit2", "Hit3", "Hit4", "Hit5", "SwimHit1", "SwimHit2", "SwimHit3", "Death1",
    "Death2", "Death3", "Death4", "Death5", "DeathKnockDown", "DeathKnockOut", "KnockDown",
    "KnockOut", "SwimWalkForward", "SwimWalkBack", "SwimWalkLeft",
    "SwimWalkRight", "SwimRunForward", "SwimRunBack", "SwimRunLeft", "SwimRunRight", "SwimTurnLeft",
    "SwimTurnRight", "WalkForward", "WalkBack", "WalkLeft", "WalkRight", "TurnLeft", "TurnRight",
    "RunForward", "RunBack", "RunLeft", "RunRight", "SneakForward", "SneakBack", "SneakLeft",
    "SneakRight", "Jump", "WalkForwardhh", "WalkBackhh", "WalkLefthh", "WalkRighthh", "TurnLefthh",
    "TurnRighthh", "RunForwardhh", "RunBackhh", "RunLefthh", "RunRighthh", "SneakForwardhh",
    "SneakBackhh", "SneakLefthh", "SneakRighthh", "Jumphh", "WalkForward1h", "WalkBack1h",
    "WalkLeft1h", "WalkRight1h", "TurnLeft1h", "TurnRight1h", "RunForward1h", "RunBack1h",
    "RunLeft1h", "RunRight1h", "SneakForward1h", "SneakBack1h", "SneakLeft1h", "SneakRight1h",
    "Jump1h", "WalkForward2c", "WalkBack2c", "WalkLeft2c", "WalkRight2c", "TurnLeft2c",
    "TurnRight2c", "RunForward2c", "RunBack2c", "RunLeft2c", "RunRight2c", "SneakForward2c",
    "SneakBack2c", "SneakLeft2c", "SneakRight2c", "Jump2c", "WalkForward2w", "WalkBack2w",
    "WalkLeft2w", "WalkRight2w", "TurnLeft2w", "TurnRight2w", "RunForward2w", "RunBack2w",
    "RunLeft2w", "RunRight2w", "SneakForward2w", "SneakBack2w", "SneakLeft2w", "SneakRight2w",
    "Jump2w", "SpellCast", "SpellTurnLeft", "SpellTurnRight", "Attack1", "Attack2", "Attack3",
    "SwimAttack1", "SwimAttack2", "SwimAttack3", "HandToHand", "Crossbow", "BowAndArrow",
    "ThrowWeapon", "WeaponOneHand", "WeaponTwoHand", "WeaponTwoWide", "Shield", "PickProbe",
    "InventoryHandToHand", "InventoryWeaponOneHand", "InventoryWeaponTwoHand",
    "InventoryWeaponTwoWide",
];

/// Name of an animation group, if the index is inside the table.
pub fn animation_group(index: u8) -> Option<&'static str> {
    ANIMATION_GROUPS.get(usize::from(index)).copied()
}
