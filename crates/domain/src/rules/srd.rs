//! Built-in SRD subset, used when no external rule set is configured.

use std::collections::BTreeMap;

use super::records::*;
use super::tables::{self, BARD_SPELLS_KNOWN, SORCERER_SPELLS_KNOWN, WARLOCK_SPELLS_KNOWN};
use super::{ClassOverride, RuleSetData};
use crate::entities::SpellcastingType;
use crate::value_objects::{Ability, Edition, ItemGrant, Skill, SkillOverlay};

use Ability::*;

pub(super) fn srd_data() -> RuleSetData {
    RuleSetData {
        races: races(),
        classes: vec![
            fighter(),
            rogue(),
            wizard(),
            cleric(),
            sorcerer(),
            bard(),
            warlock(),
            paladin(),
        ],
        class_overrides: vec![ClassOverride {
            edition: Edition::E2024,
            class: cleric_2024(),
        }],
        backgrounds: backgrounds(),
        equipment: equipment(),
        spells: spells(),
        feats: feats(),
        proficiency_bonus_by_level: tables::proficiency_bonus_table(),
    }
}

// Builders

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn bonuses(items: &[(Ability, i32)]) -> BTreeMap<Ability, i32> {
    items.iter().copied().collect()
}

fn grant(slug: &str, quantity: u32) -> ItemGrant {
    ItemGrant::new(slug, quantity)
}

fn features(items: &[(u8, &str)]) -> Vec<FeatureGrant> {
    items
        .iter()
        .map(|&(level, name)| FeatureGrant::new(level, name))
        .collect()
}

fn subclass(slug: &str, name: &str, granted: &[(u8, &str)]) -> SubclassRecord {
    SubclassRecord {
        slug: slug.to_string(),
        name: name.to_string(),
        features: features(granted),
    }
}

fn choice(id: &str, options: Vec<Vec<ItemGrant>>) -> EquipmentChoice {
    EquipmentChoice {
        id: id.to_string(),
        options,
    }
}

fn package(min_level: u8, items: Vec<ItemGrant>) -> EquipmentPackage {
    EquipmentPackage { min_level, items }
}

fn base_class(slug: &str, name: &str, hit_die: u8) -> ClassRecord {
    ClassRecord {
        slug: slug.to_string(),
        name: name.to_string(),
        hit_die,
        saving_throws: Vec::new(),
        proficiencies: Vec::new(),
        languages: Vec::new(),
        num_skill_choices: 2,
        skill_proficiencies: Vec::new(),
        features: Vec::new(),
        asi_levels: vec![4, 8, 12, 16, 19],
        subclass_level: 3,
        subclasses: Vec::new(),
        equipment_packages: Vec::new(),
        equipment_choices: Vec::new(),
        feature_options: Vec::new(),
        spellcasting: None,
    }
}

fn casting(
    ability: Ability,
    spellcasting_type: SpellcastingType,
    slots: Vec<[u8; crate::entities::SPELL_LEVELS]>,
    cantrips_known: Vec<u8>,
    spells_known: Option<&[u8]>,
) -> Option<ClassSpellcasting> {
    Some(ClassSpellcasting {
        ability,
        spellcasting_type,
        slots,
        cantrips_known,
        spells_known: spells_known.map(<[u8]>::to_vec),
        prepared_level_divisor: 1,
    })
}

const LIGHT_CASTER_WEAPONS: &[&str] = &[
    "Daggers",
    "Darts",
    "Slings",
    "Quarterstaffs",
    "Light crossbows",
];

// Classes

fn fighter() -> ClassRecord {
    ClassRecord {
        saving_throws: vec![Strength, Constitution],
        proficiencies: strings(&["All armor", "Shields", "Simple weapons", "Martial weapons"]),
        skill_proficiencies: vec![
            Skill::Acrobatics,
            Skill::AnimalHandling,
            Skill::Athletics,
            Skill::History,
            Skill::Insight,
            Skill::Intimidation,
            Skill::Perception,
            Skill::Survival,
        ],
        features: features(&[
            (1, "Fighting Style"),
            (1, "Second Wind"),
            (2, "Action Surge"),
            (3, "Martial Archetype"),
            (5, "Extra Attack"),
            (9, "Indomitable"),
            (11, "Extra Attack (2)"),
            (20, "Extra Attack (3)"),
        ]),
        asi_levels: vec![4, 6, 8, 12, 14, 16, 19],
        subclasses: vec![
            subclass(
                "champion",
                "Champion",
                &[(3, "Improved Critical"), (7, "Remarkable Athlete")],
            ),
            subclass(
                "battle-master",
                "Battle Master",
                &[(3, "Combat Superiority"), (3, "Student of War")],
            ),
        ],
        equipment_packages: vec![
            package(1, vec![grant("explorers-pack", 1)]),
            package(
                5,
                vec![grant("explorers-pack", 1), grant("potion-of-healing", 2)],
            ),
        ],
        equipment_choices: vec![
            choice(
                "fighter-armor",
                vec![
                    vec![grant("chain-mail", 1)],
                    vec![
                        grant("leather-armor", 1),
                        grant("longbow", 1),
                        grant("arrows", 20),
                    ],
                ],
            ),
            choice(
                "fighter-weapons",
                vec![
                    vec![grant("longsword", 1), grant("shield", 1)],
                    vec![grant("greatsword", 1)],
                ],
            ),
        ],
        ..base_class("fighter", "Fighter", 10)
    }
}

fn rogue() -> ClassRecord {
    ClassRecord {
        saving_throws: vec![Dexterity, Intelligence],
        proficiencies: strings(&[
            "Light armor",
            "Simple weapons",
            "Hand crossbows",
            "Longswords",
            "Rapiers",
            "Shortswords",
            "Thieves' tools",
        ]),
        languages: strings(&["Thieves' Cant"]),
        num_skill_choices: 4,
        skill_proficiencies: vec![
            Skill::Acrobatics,
            Skill::Athletics,
            Skill::Deception,
            Skill::Insight,
            Skill::Intimidation,
            Skill::Investigation,
            Skill::Perception,
            Skill::Performance,
            Skill::Persuasion,
            Skill::SleightOfHand,
            Skill::Stealth,
        ],
        features: features(&[
            (1, "Expertise"),
            (1, "Sneak Attack"),
            (1, "Thieves' Cant"),
            (2, "Cunning Action"),
            (3, "Roguish Archetype"),
            (5, "Uncanny Dodge"),
            (7, "Evasion"),
            (11, "Reliable Talent"),
        ]),
        asi_levels: vec![4, 8, 10, 12, 16, 19],
        subclasses: vec![
            subclass(
                "thief",
                "Thief",
                &[(3, "Fast Hands"), (3, "Second-Story Work")],
            ),
            subclass(
                "assassin",
                "Assassin",
                &[(3, "Bonus Proficiencies"), (3, "Assassinate")],
            ),
        ],
        equipment_packages: vec![package(
            1,
            vec![
                grant("leather-armor", 1),
                grant("dagger", 2),
                grant("thieves-tools", 1),
                grant("burglars-pack", 1),
            ],
        )],
        equipment_choices: vec![choice(
            "rogue-weapon",
            vec![vec![grant("rapier", 1)], vec![grant("shortsword", 1)]],
        )],
        ..base_class("rogue", "Rogue", 8)
    }
}

fn wizard() -> ClassRecord {
    ClassRecord {
        saving_throws: vec![Intelligence, Wisdom],
        proficiencies: strings(LIGHT_CASTER_WEAPONS),
        skill_proficiencies: vec![
            Skill::Arcana,
            Skill::History,
            Skill::Insight,
            Skill::Investigation,
            Skill::Medicine,
            Skill::Religion,
        ],
        features: features(&[
            (1, "Arcane Recovery"),
            (1, "Spellcasting"),
            (2, "Arcane Tradition"),
            (18, "Spell Mastery"),
            (20, "Signature Spells"),
        ]),
        subclass_level: 2,
        subclasses: vec![
            subclass(
                "evocation",
                "School of Evocation",
                &[(2, "Evocation Savant"), (2, "Sculpt Spells"), (6, "Potent Cantrip")],
            ),
            subclass(
                "abjuration",
                "School of Abjuration",
                &[(2, "Abjuration Savant"), (2, "Arcane Ward")],
            ),
        ],
        equipment_packages: vec![package(
            1,
            vec![grant("spellbook", 1), grant("scholars-pack", 1)],
        )],
        equipment_choices: vec![choice(
            "wizard-weapon",
            vec![vec![grant("quarterstaff", 1)], vec![grant("dagger", 1)]],
        )],
        spellcasting: casting(
            Intelligence,
            SpellcastingType::Wizard,
            tables::full_caster_slots(),
            tables::cantrip_progression(3),
            None,
        ),
        ..base_class("wizard", "Wizard", 6)
    }
}

fn cleric() -> ClassRecord {
    ClassRecord {
        saving_throws: vec![Wisdom, Charisma],
        proficiencies: strings(&["Light armor", "Medium armor", "Shields", "Simple weapons"]),
        skill_proficiencies: vec![
            Skill::History,
            Skill::Insight,
            Skill::Medicine,
            Skill::Persuasion,
            Skill::Religion,
        ],
        features: features(&[
            (1, "Spellcasting"),
            (1, "Divine Domain"),
            (2, "Channel Divinity"),
            (5, "Destroy Undead"),
            (10, "Divine Intervention"),
        ]),
        subclass_level: 1,
        subclasses: vec![
            subclass(
                "life",
                "Life Domain",
                &[(1, "Disciple of Life"), (2, "Preserve Life"), (6, "Blessed Healer")],
            ),
            subclass(
                "light",
                "Light Domain",
                &[(1, "Warding Flare"), (2, "Radiance of the Dawn")],
            ),
        ],
        equipment_packages: vec![package(
            1,
            vec![
                grant("mace", 1),
                grant("shield", 1),
                grant("holy-symbol", 1),
                grant("priests-pack", 1),
            ],
        )],
        equipment_choices: vec![choice(
            "cleric-armor",
            vec![vec![grant("scale-mail", 1)], vec![grant("leather-armor", 1)]],
        )],
        spellcasting: casting(
            Wisdom,
            SpellcastingType::Prepared,
            tables::full_caster_slots(),
            tables::cantrip_progression(3),
            None,
        ),
        ..base_class("cleric", "Cleric", 8)
    }
}

/// 2024 cleric: subclass at 3 and a divine order chosen at 1.
fn cleric_2024() -> ClassRecord {
    let legacy = cleric();
    ClassRecord {
        features: features(&[
            (1, "Spellcasting"),
            (1, "Divine Order"),
            (2, "Channel Divinity"),
            (3, "Cleric Subclass"),
            (5, "Sear Undead"),
            (10, "Divine Intervention"),
        ]),
        subclass_level: 3,
        subclasses: vec![
            subclass(
                "life",
                "Life Domain",
                &[(3, "Disciple of Life"), (3, "Preserve Life"), (6, "Blessed Healer")],
            ),
            subclass(
                "light",
                "Light Domain",
                &[(3, "Radiance of the Dawn"), (3, "Warding Flare")],
            ),
        ],
        feature_options: vec![
            FeatureOption {
                slug: "protector".to_string(),
                name: "Protector".to_string(),
                group: "divine-order".to_string(),
                skill_overlay: None,
            },
            FeatureOption {
                slug: "thaumaturge".to_string(),
                name: "Thaumaturge".to_string(),
                group: "divine-order".to_string(),
                skill_overlay: Some(SkillOverlay {
                    source: "Thaumaturge".to_string(),
                    ability: Wisdom,
                    skills: vec![Skill::Arcana, Skill::Religion],
                    minimum: 1,
                }),
            },
        ],
        ..legacy
    }
}

fn sorcerer() -> ClassRecord {
    ClassRecord {
        saving_throws: vec![Constitution, Charisma],
        proficiencies: strings(LIGHT_CASTER_WEAPONS),
        skill_proficiencies: vec![
            Skill::Arcana,
            Skill::Deception,
            Skill::Insight,
            Skill::Intimidation,
            Skill::Persuasion,
            Skill::Religion,
        ],
        features: features(&[
            (1, "Spellcasting"),
            (1, "Sorcerous Origin"),
            (2, "Font of Magic"),
            (3, "Metamagic"),
            (20, "Sorcerous Restoration"),
        ]),
        subclass_level: 1,
        subclasses: vec![
            subclass(
                "draconic-bloodline",
                "Draconic Bloodline",
                &[(1, "Dragon Ancestor"), (1, "Draconic Resilience"), (6, "Elemental Affinity")],
            ),
            subclass(
                "wild-magic",
                "Wild Magic",
                &[(1, "Wild Magic Surge"), (1, "Tides of Chaos")],
            ),
        ],
        equipment_packages: vec![package(
            1,
            vec![grant("dagger", 2), grant("component-pouch", 1), grant("dungeoneers-pack", 1)],
        )],
        equipment_choices: vec![choice(
            "sorcerer-weapon",
            vec![
                vec![grant("light-crossbow", 1), grant("bolts", 20)],
                vec![grant("quarterstaff", 1)],
            ],
        )],
        spellcasting: casting(
            Charisma,
            SpellcastingType::Known,
            tables::full_caster_slots(),
            tables::cantrip_progression(4),
            Some(&SORCERER_SPELLS_KNOWN[..]),
        ),
        ..base_class("sorcerer", "Sorcerer", 6)
    }
}

fn bard() -> ClassRecord {
    ClassRecord {
        saving_throws: vec![Dexterity, Charisma],
        proficiencies: strings(&[
            "Light armor",
            "Simple weapons",
            "Hand crossbows",
            "Longswords",
            "Rapiers",
            "Shortswords",
            "Three musical instruments",
        ]),
        num_skill_choices: 3,
        skill_proficiencies: Skill::ALL.to_vec(),
        features: features(&[
            (1, "Bardic Inspiration"),
            (1, "Spellcasting"),
            (2, "Jack of All Trades"),
            (2, "Song of Rest"),
            (3, "Bard College"),
            (3, "Expertise"),
            (5, "Font of Inspiration"),
            (6, "Countercharm"),
        ]),
        asi_levels: vec![4, 8, 12, 16, 19],
        subclasses: vec![
            subclass(
                "lore",
                "College of Lore",
                &[(3, "Bonus Proficiencies"), (3, "Cutting Words")],
            ),
            subclass(
                "valor",
                "College of Valor",
                &[(3, "Bonus Proficiencies"), (3, "Combat Inspiration")],
            ),
        ],
        equipment_packages: vec![package(
            1,
            vec![grant("leather-armor", 1), grant("dagger", 1), grant("entertainers-pack", 1)],
        )],
        equipment_choices: vec![choice(
            "bard-weapon",
            vec![vec![grant("rapier", 1)], vec![grant("longsword", 1)]],
        )],
        spellcasting: casting(
            Charisma,
            SpellcastingType::Known,
            tables::full_caster_slots(),
            tables::cantrip_progression(2),
            Some(&BARD_SPELLS_KNOWN[..]),
        ),
        ..base_class("bard", "Bard", 8)
    }
}

fn warlock() -> ClassRecord {
    ClassRecord {
        saving_throws: vec![Wisdom, Charisma],
        proficiencies: strings(&["Light armor", "Simple weapons"]),
        skill_proficiencies: vec![
            Skill::Arcana,
            Skill::Deception,
            Skill::History,
            Skill::Intimidation,
            Skill::Investigation,
            Skill::Nature,
            Skill::Religion,
        ],
        features: features(&[
            (1, "Otherworldly Patron"),
            (1, "Pact Magic"),
            (2, "Eldritch Invocations"),
            (3, "Pact Boon"),
            (11, "Mystic Arcanum"),
            (20, "Eldritch Master"),
        ]),
        subclass_level: 1,
        subclasses: vec![
            subclass(
                "fiend",
                "The Fiend",
                &[(1, "Dark One's Blessing"), (6, "Dark One's Own Luck")],
            ),
            subclass(
                "archfey",
                "The Archfey",
                &[(1, "Fey Presence"), (6, "Misty Escape")],
            ),
        ],
        equipment_packages: vec![package(
            1,
            vec![grant("leather-armor", 1), grant("dagger", 2), grant("component-pouch", 1)],
        )],
        equipment_choices: vec![choice(
            "warlock-pack",
            vec![vec![grant("scholars-pack", 1)], vec![grant("dungeoneers-pack", 1)]],
        )],
        spellcasting: casting(
            Charisma,
            SpellcastingType::Known,
            tables::pact_slots(),
            tables::cantrip_progression(2),
            Some(&WARLOCK_SPELLS_KNOWN[..]),
        ),
        ..base_class("warlock", "Warlock", 8)
    }
}

fn paladin() -> ClassRecord {
    ClassRecord {
        saving_throws: vec![Wisdom, Charisma],
        proficiencies: strings(&["All armor", "Shields", "Simple weapons", "Martial weapons"]),
        skill_proficiencies: vec![
            Skill::Athletics,
            Skill::Insight,
            Skill::Intimidation,
            Skill::Medicine,
            Skill::Persuasion,
            Skill::Religion,
        ],
        features: features(&[
            (1, "Divine Sense"),
            (1, "Lay on Hands"),
            (2, "Fighting Style"),
            (2, "Spellcasting"),
            (2, "Divine Smite"),
            (3, "Divine Health"),
            (3, "Sacred Oath"),
            (5, "Extra Attack"),
            (6, "Aura of Protection"),
        ]),
        subclasses: vec![
            subclass(
                "devotion",
                "Oath of Devotion",
                &[(3, "Sacred Weapon"), (3, "Turn the Unholy"), (7, "Aura of Devotion")],
            ),
            subclass(
                "vengeance",
                "Oath of Vengeance",
                &[(3, "Abjure Enemy"), (3, "Vow of Enmity")],
            ),
        ],
        equipment_packages: vec![package(
            1,
            vec![
                grant("chain-mail", 1),
                grant("javelin", 5),
                grant("holy-symbol", 1),
                grant("priests-pack", 1),
            ],
        )],
        equipment_choices: vec![choice(
            "paladin-weapons",
            vec![
                vec![grant("longsword", 1), grant("shield", 1)],
                vec![grant("greatsword", 1)],
            ],
        )],
        spellcasting: casting(
            Charisma,
            SpellcastingType::Prepared,
            tables::half_caster_slots(),
            tables::no_cantrips(),
            None,
        )
        .map(|sc| ClassSpellcasting {
            prepared_level_divisor: 2,
            ..sc
        }),
        ..base_class("paladin", "Paladin", 10)
    }
}

// Races

fn race(slug: &str, name: &str, ability_bonuses: &[(Ability, i32)]) -> RaceRecord {
    RaceRecord {
        slug: slug.to_string(),
        name: name.to_string(),
        ability_bonuses: bonuses(ability_bonuses),
        traits: Vec::new(),
        languages: Vec::new(),
        proficiencies: Vec::new(),
        speed: 30,
        hp_bonus_per_level: 0,
        variants: Vec::new(),
        lineages: Vec::new(),
    }
}

fn variant(slug: &str, name: &str, ability_bonuses: &[(Ability, i32)], traits: &[&str]) -> RaceVariant {
    RaceVariant {
        slug: slug.to_string(),
        name: name.to_string(),
        ability_bonuses: bonuses(ability_bonuses),
        traits: strings(traits),
    }
}

fn lineage(slug: &str, name: &str, traits: &[&str]) -> Lineage {
    Lineage {
        slug: slug.to_string(),
        name: name.to_string(),
        traits: strings(traits),
    }
}

fn races() -> Vec<RaceRecord> {
    let all_plus_one: Vec<(Ability, i32)> = Ability::ALL.iter().map(|&a| (a, 1)).collect();
    vec![
        RaceRecord {
            variants: vec![variant(
                "variant-human",
                "Variant Human",
                &[(Strength, 1), (Constitution, 1)],
                &["Skill Versatility", "Bonus Feat"],
            )],
            ..race("human", "Human", &all_plus_one)
        },
        RaceRecord {
            traits: strings(&["Darkvision", "Dwarven Resilience", "Stonecunning", "Dwarven Toughness"]),
            languages: strings(&["Dwarvish"]),
            proficiencies: strings(&["Battleaxe", "Handaxe", "Light hammer", "Warhammer"]),
            speed: 25,
            hp_bonus_per_level: 1,
            variants: vec![variant(
                "hill-dwarf",
                "Hill Dwarf",
                &[(Constitution, 2), (Wisdom, 1)],
                &[],
            )],
            ..race("dwarf", "Dwarf", &[(Constitution, 2)])
        },
        RaceRecord {
            traits: strings(&["Darkvision", "Keen Senses", "Fey Ancestry", "Trance"]),
            languages: strings(&["Elvish"]),
            lineages: vec![
                lineage("high-elf", "High Elf", &["Elf Weapon Training", "Cantrip"]),
                lineage("wood-elf", "Wood Elf", &["Fleet of Foot", "Mask of the Wild"]),
                lineage("drow", "Drow", &["Superior Darkvision", "Sunlight Sensitivity"]),
            ],
            ..race("elf", "Elf", &[(Dexterity, 2)])
        },
        RaceRecord {
            traits: strings(&["Lucky", "Brave", "Halfling Nimbleness"]),
            languages: strings(&["Halfling"]),
            speed: 25,
            variants: vec![
                variant("lightfoot", "Lightfoot", &[(Dexterity, 2), (Charisma, 1)], &["Naturally Stealthy"]),
                variant("stout", "Stout", &[(Dexterity, 2), (Constitution, 1)], &["Stout Resilience"]),
            ],
            ..race("halfling", "Halfling", &[(Dexterity, 2)])
        },
    ]
}

// Backgrounds

fn backgrounds() -> Vec<BackgroundRecord> {
    let background = |slug: &str,
                      name: &str,
                      skills: &[Skill],
                      languages: &[&str],
                      equipment: Vec<ItemGrant>,
                      feature: &str| BackgroundRecord {
        slug: slug.to_string(),
        name: name.to_string(),
        skill_proficiencies: skills.to_vec(),
        languages: strings(languages),
        equipment,
        feature: Some(feature.to_string()),
    };

    vec![
        background(
            "acolyte",
            "Acolyte",
            &[Skill::Insight, Skill::Religion],
            &["Celestial"],
            vec![grant("holy-symbol", 1), grant("prayer-book", 1), grant("common-clothes", 1)],
            "Shelter of the Faithful",
        ),
        background(
            "soldier",
            "Soldier",
            &[Skill::Athletics, Skill::Intimidation],
            &[],
            vec![grant("insignia-of-rank", 1), grant("common-clothes", 1)],
            "Military Rank",
        ),
        background(
            "sage",
            "Sage",
            &[Skill::Arcana, Skill::History],
            &["Draconic"],
            vec![grant("ink", 1), grant("quill", 1), grant("common-clothes", 1)],
            "Researcher",
        ),
        background(
            "hermit",
            "Hermit",
            &[Skill::Medicine, Skill::Religion],
            &[],
            Vec::new(),
            "Discovery",
        ),
    ]
}

// Equipment

fn armor(
    slug: &str,
    name: &str,
    category: ArmorCategory,
    base: i32,
    max_bonus: Option<i32>,
    weight: f32,
) -> EquipmentRecord {
    EquipmentRecord {
        slug: slug.to_string(),
        name: name.to_string(),
        armor_category: Some(category),
        armor_class: Some(ArmorClassSpec {
            base,
            dex_bonus: matches!(category, ArmorCategory::Light | ArmorCategory::Medium),
            max_bonus,
        }),
        weapon_category: None,
        properties: Vec::new(),
        weight,
    }
}

fn weapon(
    slug: &str,
    name: &str,
    category: WeaponCategory,
    properties: &[&str],
    weight: f32,
) -> EquipmentRecord {
    EquipmentRecord {
        slug: slug.to_string(),
        name: name.to_string(),
        armor_category: None,
        armor_class: None,
        weapon_category: Some(category),
        properties: strings(properties),
        weight,
    }
}

fn gear(slug: &str, name: &str, weight: f32) -> EquipmentRecord {
    EquipmentRecord {
        slug: slug.to_string(),
        name: name.to_string(),
        armor_category: None,
        armor_class: None,
        weapon_category: None,
        properties: Vec::new(),
        weight,
    }
}

fn equipment() -> Vec<EquipmentRecord> {
    use ArmorCategory::{Heavy, Light, Medium, Shield};
    use WeaponCategory::{Martial, Simple};

    vec![
        armor("padded-armor", "Padded Armor", Light, 11, None, 8.0),
        armor("leather-armor", "Leather Armor", Light, 11, None, 10.0),
        armor("studded-leather", "Studded Leather", Light, 12, None, 13.0),
        armor("hide-armor", "Hide Armor", Medium, 12, Some(2), 12.0),
        armor("chain-shirt", "Chain Shirt", Medium, 13, Some(2), 20.0),
        armor("scale-mail", "Scale Mail", Medium, 14, Some(2), 45.0),
        armor("breastplate", "Breastplate", Medium, 14, Some(2), 20.0),
        armor("half-plate", "Half Plate", Medium, 15, Some(2), 40.0),
        armor("ring-mail", "Ring Mail", Heavy, 14, None, 40.0),
        armor("chain-mail", "Chain Mail", Heavy, 16, None, 55.0),
        armor("splint-armor", "Splint Armor", Heavy, 17, None, 60.0),
        armor("plate-armor", "Plate Armor", Heavy, 18, None, 65.0),
        armor("shield", "Shield", Shield, 2, None, 6.0),
        weapon("dagger", "Dagger", Simple, &["finesse", "light", "thrown"], 1.0),
        weapon("handaxe", "Handaxe", Simple, &["light", "thrown"], 2.0),
        weapon("javelin", "Javelin", Simple, &["thrown"], 2.0),
        weapon("mace", "Mace", Simple, &[], 4.0),
        weapon("quarterstaff", "Quarterstaff", Simple, &["versatile"], 4.0),
        weapon("light-crossbow", "Light Crossbow", Simple, &["ammunition", "loading", "two-handed"], 5.0),
        weapon("shortbow", "Shortbow", Simple, &["ammunition", "two-handed"], 2.0),
        weapon("battleaxe", "Battleaxe", Martial, &["versatile"], 4.0),
        weapon("greatsword", "Greatsword", Martial, &["heavy", "two-handed"], 6.0),
        weapon("longsword", "Longsword", Martial, &["versatile"], 3.0),
        weapon("rapier", "Rapier", Martial, &["finesse"], 2.0),
        weapon("shortsword", "Shortsword", Martial, &["finesse", "light"], 2.0),
        weapon("warhammer", "Warhammer", Martial, &["versatile"], 2.0),
        weapon("longbow", "Longbow", Martial, &["ammunition", "heavy", "two-handed"], 2.0),
        gear("arrows", "Arrow", 0.05),
        gear("bolts", "Crossbow Bolt", 0.075),
        gear("burglars-pack", "Burglar's Pack", 44.5),
        gear("dungeoneers-pack", "Dungeoneer's Pack", 61.5),
        gear("entertainers-pack", "Entertainer's Pack", 38.0),
        gear("explorers-pack", "Explorer's Pack", 59.0),
        gear("priests-pack", "Priest's Pack", 24.0),
        gear("scholars-pack", "Scholar's Pack", 10.0),
        gear("thieves-tools", "Thieves' Tools", 1.0),
        gear("holy-symbol", "Holy Symbol", 1.0),
        gear("component-pouch", "Component Pouch", 2.0),
        gear("spellbook", "Spellbook", 3.0),
        gear("prayer-book", "Prayer Book", 5.0),
        gear("common-clothes", "Common Clothes", 3.0),
        gear("insignia-of-rank", "Insignia of Rank", 0.0),
        gear("ink", "Bottle of Ink", 0.0),
        gear("quill", "Quill", 0.0),
        gear("potion-of-healing", "Potion of Healing", 0.5),
    ]
}

// Spells and feats

fn spells() -> Vec<SpellRecord> {
    let spell = |slug: &str, name: &str, level: u8, school: &str, classes: &[&str]| SpellRecord {
        slug: slug.to_string(),
        name: name.to_string(),
        level,
        school: school.to_string(),
        classes: strings(classes),
    };
    let arcane = &["wizard", "sorcerer", "bard", "warlock"];

    vec![
        spell("fire-bolt", "Fire Bolt", 0, "evocation", &["wizard", "sorcerer"]),
        spell("ray-of-frost", "Ray of Frost", 0, "evocation", &["wizard", "sorcerer"]),
        spell("shocking-grasp", "Shocking Grasp", 0, "evocation", &["wizard", "sorcerer"]),
        spell("mage-hand", "Mage Hand", 0, "conjuration", arcane),
        spell("minor-illusion", "Minor Illusion", 0, "illusion", arcane),
        spell("prestidigitation", "Prestidigitation", 0, "transmutation", arcane),
        spell("light", "Light", 0, "evocation", &["wizard", "sorcerer", "bard", "cleric"]),
        spell("sacred-flame", "Sacred Flame", 0, "evocation", &["cleric"]),
        spell("guidance", "Guidance", 0, "divination", &["cleric"]),
        spell("thaumaturgy", "Thaumaturgy", 0, "transmutation", &["cleric"]),
        spell("eldritch-blast", "Eldritch Blast", 0, "evocation", &["warlock"]),
        spell("vicious-mockery", "Vicious Mockery", 0, "enchantment", &["bard"]),
        spell("magic-missile", "Magic Missile", 1, "evocation", &["wizard", "sorcerer"]),
        spell("shield", "Shield", 1, "abjuration", &["wizard", "sorcerer"]),
        spell("mage-armor", "Mage Armor", 1, "abjuration", &["wizard", "sorcerer"]),
        spell("burning-hands", "Burning Hands", 1, "evocation", &["wizard", "sorcerer"]),
        spell("sleep", "Sleep", 1, "enchantment", &["wizard", "sorcerer", "bard"]),
        spell("charm-person", "Charm Person", 1, "enchantment", arcane),
        spell("detect-magic", "Detect Magic", 1, "divination", &["wizard", "sorcerer", "bard", "cleric", "paladin"]),
        spell("thunderwave", "Thunderwave", 1, "evocation", &["wizard", "sorcerer", "bard"]),
        spell("hex", "Hex", 1, "enchantment", &["warlock"]),
        spell("cure-wounds", "Cure Wounds", 1, "evocation", &["cleric", "bard", "paladin"]),
        spell("healing-word", "Healing Word", 1, "evocation", &["cleric", "bard"]),
        spell("bless", "Bless", 1, "enchantment", &["cleric", "paladin"]),
        spell("misty-step", "Misty Step", 2, "conjuration", &["wizard", "sorcerer", "warlock"]),
        spell("scorching-ray", "Scorching Ray", 2, "evocation", &["wizard", "sorcerer"]),
        spell("hold-person", "Hold Person", 2, "enchantment", &["wizard", "sorcerer", "bard", "cleric", "warlock"]),
        spell("spiritual-weapon", "Spiritual Weapon", 2, "evocation", &["cleric"]),
        spell("fireball", "Fireball", 3, "evocation", &["wizard", "sorcerer"]),
        spell("counterspell", "Counterspell", 3, "abjuration", &["wizard", "sorcerer", "warlock"]),
        spell("revivify", "Revivify", 3, "necromancy", &["cleric", "paladin"]),
    ]
}

fn feats() -> Vec<FeatRecord> {
    let feat = |slug: &str, name: &str, increases: &[(Ability, i32)], description: &str| FeatRecord {
        slug: slug.to_string(),
        name: name.to_string(),
        ability_increases: bonuses(increases),
        description: description.to_string(),
    };

    vec![
        feat("alert", "Alert", &[], "+5 to initiative; you cannot be surprised."),
        feat("lucky", "Lucky", &[], "Three luck points per long rest."),
        feat("war-caster", "War Caster", &[], "Advantage on concentration saves."),
        feat("tough", "Tough", &[], "Hit point maximum increases by 2 per level."),
        feat(
            "resilient-constitution",
            "Resilient (Constitution)",
            &[(Constitution, 1)],
            "+1 Constitution and proficiency in Constitution saves.",
        ),
        feat("actor", "Actor", &[(Charisma, 1)], "+1 Charisma; advantage on impersonation."),
        feat(
            "heavily-armored",
            "Heavily Armored",
            &[(Strength, 1)],
            "+1 Strength and proficiency with heavy armor.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_has_a_full_table_set() {
        for class in srd_data().classes {
            if let Some(sc) = &class.spellcasting {
                assert_eq!(sc.slots.len(), 20, "{}", class.slug);
                assert_eq!(sc.cantrips_known.len(), 20, "{}", class.slug);
            }
        }
    }

    #[test]
    fn granted_items_exist_in_equipment_table() {
        let data = srd_data();
        let known: Vec<&str> = data.equipment.iter().map(|e| e.slug.as_str()).collect();
        let class_items = data.classes.iter().flat_map(|c| {
            c.equipment_packages
                .iter()
                .flat_map(|p| p.items.iter())
                .chain(c.equipment_choices.iter().flat_map(|ch| ch.options.iter().flatten()))
        });
        let background_items = data.backgrounds.iter().flat_map(|b| b.equipment.iter());

        for item in class_items.chain(background_items) {
            assert!(known.contains(&item.slug.as_str()), "missing {}", item.slug);
        }
    }

    #[test]
    fn hermit_has_no_equipment() {
        let data = srd_data();
        let hermit = data.backgrounds.iter().find(|b| b.slug == "hermit").unwrap();
        assert!(hermit.equipment.is_empty());
    }

    #[test]
    fn dwarves_gain_extra_hit_points_per_level() {
        let data = srd_data();
        let dwarf = data.races.iter().find(|r| r.slug == "dwarf").unwrap();
        assert_eq!(dwarf.hp_bonus_per_level, 1);
    }
}
