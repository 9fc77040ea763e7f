//! Integration tests driving a character through a full adventuring day
//! via the public API: a defeat, a revival, a second defeat, a night's
//! rest, and a trip to the shop.

use wayfarer_core::{
    ac_parts, spell_attack, ArmorCategory, ArmorItem, Attribute, Attributes, Bonus, CastingSource,
    Character, Coins, ConditionKind, FocusPool, InnateSpell, Proficiency, SpellSlot, VariableStore,
};

const MAX_HEALTH: i32 = 35;

fn cleric() -> Character {
    let mut hero = Character::new("Kyra")
        .with_level(3)
        .with_attributes(Attributes::new(12, 10, 14, 10, 18, 12))
        .with_class_hp(8)
        .with_key_attribute(Attribute::Wisdom);
    hero.hp_current = MAX_HEALTH;
    hero.spellcasting.slots = vec![SpellSlot::new(1, "cleric"), SpellSlot::new(2, "cleric")];
    hero.spellcasting.innate = vec![InnateSpell::new("Know Direction", 0, 1)];
    hero.spellcasting.focus = FocusPool {
        current: 1,
        maximum: 1,
    };
    hero.armor_proficiencies
        .categories
        .insert(ArmorCategory::Medium, Proficiency::Trained);
    hero
}

#[test]
fn test_death_spiral_and_recovery() {
    let mut hero = cleric();

    // Dropped in battle: Dying starts at 1 with no Wounded history.
    hero.confirm_health("35-35", MAX_HEALTH);
    assert_eq!(hero.hp_current, 0);
    assert_eq!(hero.condition_value(ConditionKind::Dying), Some(1));

    // Healed back up: Dying clears, Wounded begins.
    hero.confirm_health("3+4", MAX_HEALTH);
    assert_eq!(hero.hp_current, 7);
    assert!(!hero.has_condition(ConditionKind::Dying));
    assert_eq!(hero.condition_value(ConditionKind::Wounded), Some(1));

    // Dropped a second time: Wounded seeds a higher Dying value.
    hero.confirm_health("0", MAX_HEALTH);
    assert_eq!(hero.condition_value(ConditionKind::Dying), Some(2));

    hero.confirm_health("5", MAX_HEALTH);
    assert_eq!(hero.condition_value(ConditionKind::Wounded), Some(2));
}

#[test]
fn test_night_rest_recovers_the_day() {
    let mut hero = cleric();
    hero.confirm_health("5", MAX_HEALTH);
    hero.add_condition(ConditionKind::Wounded, Some(2));
    hero.add_condition(ConditionKind::Fatigued, None);
    hero.add_condition(ConditionKind::Drained, Some(2));
    assert!(hero.spellcasting.use_slot(2));
    assert!(hero.spellcasting.cast_innate("Know Direction"));
    assert!(hero.spellcasting.spend_focus());

    hero.rest(MAX_HEALTH);

    // Level 3 with CON +2 regenerates 6.
    assert_eq!(hero.hp_current, 11);
    assert!(!hero.has_condition(ConditionKind::Fatigued));
    assert_eq!(hero.condition_value(ConditionKind::Drained), Some(1));
    // Not at full health, so Wounded persists.
    assert_eq!(hero.condition_value(ConditionKind::Wounded), Some(2));
    assert!(hero.spellcasting.slots.iter().all(|slot| !slot.exhausted));
    assert_eq!(hero.spellcasting.innate[0].casts_current, 0);
    assert_eq!(hero.spellcasting.focus.current, 1);
}

#[test]
fn test_shopping_trip() {
    let purse = Coins::new(0, 0, 10, 0);
    let price = Coins {
        gp: 4,
        sp: 5,
        ..Default::default()
    };

    let change = purse.purchase(&price).expect("10 gp covers 4 gp 5 sp");
    assert_eq!(change.total_cp(), purse.total_cp() - price.total_cp());
    // Five whole gold survive; one is broken for the silver.
    assert_eq!(change, Coins::new(0, 5, 5, 0));

    let too_dear = Coins {
        pp: 2,
        ..Default::default()
    };
    assert_eq!(purse.purchase(&too_dear), None);
    assert_eq!(price.to_string(), "4 gp, 5 sp");
}

#[test]
fn test_sheet_numbers_for_the_shopkeepers_armor() {
    let hero = cleric();
    let mut store = VariableStore::new();
    store.add_bonus(hero.id, wayfarer_core::armor::AC_BONUS, Bonus::flat(1, "shield"));

    let chain_shirt = ArmorItem::new("Chain Shirt", ArmorCategory::Medium, 2)
        .with_dex_cap(3)
        .with_strength(12)
        .with_check_penalty(1);
    let parts = ac_parts(&hero, &store, Some(&chain_shirt));

    // Trained at level 3 (+5), DEX +0, armor +2, shield +1.
    assert_eq!(parts.total(), 18);
    // STR 12 meets the requirement, so the check penalty is waived.
    assert_eq!(parts.check_penalty, 0);

    let source = CastingSource::new("cleric")
        .with_key_attribute(Attribute::Wisdom)
        .with_proficiency(Proficiency::Trained);
    let attack = spell_attack(&hero, &store, &source, Some("30 feet"));
    assert_eq!(attack.map(), [9, 4, -1]);
}

#[test]
fn test_character_snapshot_round_trip() {
    let mut hero = cleric();
    hero.confirm_health("0", MAX_HEALTH);
    hero.confirm_experience("400+250");

    let json = serde_json::to_string(&hero).expect("serialize");
    let restored: Character = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(
        serde_json::to_value(&restored).unwrap(),
        serde_json::to_value(&hero).unwrap()
    );
    assert_eq!(restored.experience, 650);
    assert_eq!(restored.condition_value(ConditionKind::Dying), Some(1));
}
