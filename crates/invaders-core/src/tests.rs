#[cfg(test)]
mod tests {
    use crate::commands::{InputState, PlayerCommand};
    use crate::components::{DotEffect, Hitbox, SkillSlot};
    use crate::enums::*;
    use crate::error::GameDataError;
    use crate::events::GameEvent;
    use crate::gamedata::{EnemyData, GameData, WaveData};
    use crate::state::GameStateSnapshot;
    use crate::types::{Countdown, Position, RepeatTimer, Velocity};

    fn minimal_data(extra_wave: &str) -> String {
        format!(
            r#"{{
                "characters": [{{
                    "id": "leo", "name": "Leo",
                    "spriteKey": "player_leo", "portraitKey": "portrait_leo",
                    "baseStats": {{ "hp": 100, "speed": 300, "shootCooldown": 250 }},
                    "skills": []
                }}],
                "enemies": {{ "cliche_iceberg_1": {{ "hp": 20 }} }},
                "worlds": [{{ "id": "cafeteria", "waves": [{extra_wave}] }}]
            }}"#
        )
    }

    #[test]
    fn test_builtin_data_loads() {
        let data = GameData::builtin().unwrap();
        assert!(data.character("leo").is_some());
        assert!(data.world("cafeteria").is_some());
        assert!(data.boss("nico").is_some());
        assert_eq!(data.selectable_characters().len(), 3);
    }

    #[test]
    fn test_builtin_world_ends_with_boss() {
        let data = GameData::builtin().unwrap();
        let world = data.world("cafeteria").unwrap();
        let last = world.waves.last().unwrap();
        assert_eq!(last.kind(), WaveKind::BossFight);
    }

    #[test]
    fn test_skill_ids_use_snake_case() {
        let json = serde_json::to_string(&SkillId::LHommeTimide).unwrap();
        assert_eq!(json, "\"l_homme_timide\"");
        let back: SkillId = serde_json::from_str("\"tour_de_piste\"").unwrap();
        assert_eq!(back, SkillId::TourDePiste);
    }

    #[test]
    fn test_unknown_wave_type_parses() {
        let json = minimal_data(r#"{ "type": "meteor_shower", "count": 3 }"#);
        let data = GameData::from_json(&json).unwrap();
        let wave = &data.world("cafeteria").unwrap().waves[0];
        assert!(matches!(wave, WaveData::Unknown));
    }

    #[test]
    fn test_kill_count_wave_fields() {
        let json = minimal_data(
            r#"{ "type": "kill_count", "enemyType": "x", "count": 4, "elite": true,
                 "enemyConfig": { "hp": 55 } }"#,
        );
        let data = GameData::from_json(&json).unwrap();
        match &data.world("cafeteria").unwrap().waves[0] {
            WaveData::KillCount {
                enemy_type,
                count,
                spawn_delay,
                elite,
                enemy_config,
            } => {
                assert_eq!(enemy_type, "x");
                assert_eq!(*count, 4);
                assert!(spawn_delay.is_none());
                assert!(*elite);
                assert_eq!(enemy_config.as_ref().unwrap().hp, Some(55.0));
            }
            other => panic!("unexpected wave {other:?}"),
        }
    }

    #[test]
    fn test_unknown_attack_and_movement_fall_back() {
        let attack: crate::gamedata::BossAttackData = serde_json::from_str(
            r#"{ "id": "laser", "type": "orbital_laser", "cooldown": 1000 }"#,
        )
        .unwrap();
        assert_eq!(attack.kind, BossAttackKind::Inert);

        let movement: crate::gamedata::BossMovementData =
            serde_json::from_str(r#"{ "type": "teleport" }"#).unwrap();
        assert_eq!(movement.kind, BossMovementKind::Stationary);
    }

    #[test]
    fn test_unknown_skill_id_loads_as_inert_slot() {
        let json = r#"{
            "characters": [{
                "id": "leo", "name": "Leo",
                "spriteKey": "player_leo", "portraitKey": "portrait_leo",
                "baseStats": { "hp": 100, "speed": 300, "shootCooldown": 250 },
                "skills": [
                    { "id": "laser", "name": "Laser", "cooldown": 5000 },
                    { "id": "analyse", "name": "Analyse", "cooldown": 8000, "duration": 3000 }
                ]
            }],
            "enemies": {},
            "worlds": [{ "id": "cafeteria", "waves": [] }]
        }"#;
        let data = GameData::from_json(json).unwrap();
        let skills = &data.character("leo").unwrap().skills;
        assert_eq!(skills[0].id, SkillId::Unknown);
        assert_eq!(skills[0].name, "Laser");
        assert_eq!(skills[1].id, SkillId::Analyse);
    }

    #[test]
    fn test_zero_counts_as_unset() {
        use crate::gamedata::{nonzero, nonzero_or};

        assert_eq!(nonzero_or(Some(0.0), 2000.0), 2000.0);
        assert_eq!(nonzero_or(None, 800.0), 800.0);
        assert_eq!(nonzero_or(Some(350.0), 800.0), 350.0);
        assert_eq!(nonzero_or(Some(0u32), 1), 1);
        assert_eq!(nonzero(Some(-5.0)), Some(-5.0));
        assert_eq!(nonzero::<u64>(Some(0)), None);
    }

    #[test]
    fn test_resolve_enemy_falls_back() {
        let data = GameData::builtin().unwrap();
        let fallback = data.resolve_enemy("does_not_exist").unwrap();
        assert_eq!(fallback, data.enemies.get("cliche_iceberg_1").unwrap());

        let mut empty = data.clone();
        empty.enemies.clear();
        assert!(empty.resolve_enemy("does_not_exist").is_none());
    }

    #[test]
    fn test_enemy_config_merge() {
        let base = EnemyData {
            hp: Some(20.0),
            speed_y: Some(60.0),
            score_value: Some(10),
            ..Default::default()
        };
        let overrides = EnemyData {
            hp: Some(45.0),
            bullet_damage: Some(9.0),
            ..Default::default()
        };
        let merged = base.merged(&overrides);
        assert_eq!(merged.hp, Some(45.0));
        assert_eq!(merged.speed_y, Some(60.0));
        assert_eq!(merged.score_value, Some(10));
        assert_eq!(merged.bullet_damage, Some(9.0));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut data = GameData::builtin().unwrap();
        let copy = data.characters[0].clone();
        data.characters.push(copy);
        assert!(matches!(data.validate(), Err(GameDataError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_empty_worlds() {
        let mut data = GameData::builtin().unwrap();
        data.worlds.clear();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = GameData::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GameDataError::Parse(_)));
    }

    #[test]
    fn test_selectable_requires_portrait() {
        let mut data = GameData::builtin().unwrap();
        data.characters[1].portrait_key = None;
        let ids: Vec<_> = data
            .selectable_characters()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(ids, vec!["leo".to_string(), "manu".to_string()]);
    }

    #[test]
    fn test_countdown_expires_once_and_pauses() {
        let mut timer = Countdown::new(50.0);
        assert!(!timer.advance(20.0));
        timer.paused = true;
        assert!(!timer.advance(100.0));
        timer.paused = false;
        assert!(!timer.advance(20.0));
        assert!(timer.advance(20.0));
    }

    #[test]
    fn test_repeat_timer_fires_each_cycle() {
        let mut timer = RepeatTimer::new(100.0);
        let fires = (0..30).filter(|_| timer.advance(16.0)).count();
        // 480 ms elapsed
        assert_eq!(fires, 4);
    }

    #[test]
    fn test_repeat_timer_shortened_delay_fires_once() {
        let mut timer = RepeatTimer::new(1000.0);
        for _ in 0..50 {
            timer.advance(16.0);
        }
        timer.delay_ms = 100.0;
        assert!(timer.advance(16.0));
        assert!(!timer.advance(16.0));
    }

    #[test]
    fn test_health_tier_bands() {
        assert_eq!(HealthTier::from_fraction(1.0), HealthTier::High);
        assert_eq!(HealthTier::from_fraction(0.6), HealthTier::Medium);
        assert_eq!(HealthTier::from_fraction(0.31), HealthTier::Medium);
        assert_eq!(HealthTier::from_fraction(0.3), HealthTier::Low);
    }

    #[test]
    fn test_angle_and_velocity() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(0.0, 10.0);
        let angle = a.angle_to(&b);
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        let v = Velocity::from_angle(angle, 300.0);
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - 300.0).abs() < 1e-9);
        assert!((a.distance_to(&b) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_hitbox_overlap() {
        let a = Hitbox::new(32.0, 32.0);
        let b = Hitbox::circle(4.0);
        assert!(a.overlaps(&Position::new(100.0, 100.0), &b, &Position::new(115.0, 100.0)));
        assert!(!a.overlaps(&Position::new(100.0, 100.0), &b, &Position::new(125.0, 100.0)));
    }

    #[test]
    fn test_skill_slot_readiness() {
        let data = GameData::builtin().unwrap();
        let skill = data.character("leo").unwrap().skills[0].clone();
        let cooldown = skill.cooldown;
        let mut slot = SkillSlot::new(skill);
        assert!(slot.is_ready(0.0));

        slot.active = true;
        slot.last_used_ms = Some(1000.0);
        slot.activated_at_ms = 1000.0;
        assert!(!slot.is_ready(1000.0 + cooldown + 1.0));

        slot.active = false;
        assert!(!slot.is_ready(1000.0 + cooldown));
        assert!(slot.is_ready(1000.0 + cooldown + 1.0));
    }

    #[test]
    fn test_dot_interval_guards_zero_ticks() {
        let dot = DotEffect::new(5.0, 3000.0, 0, 0.0);
        assert_eq!(dot.tick_interval_ms(), 3000.0);
        assert!(!dot.has_expired(3000.0));
        assert!(dot.has_expired(3000.1));
    }

    #[test]
    fn test_command_is_tagged() {
        let cmd = PlayerCommand::StartGame {
            character_id: Some("manu".into()),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"StartGame\""));
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);

        let input = PlayerCommand::SetInput(InputState {
            shoot: true,
            ..Default::default()
        });
        let json = serde_json::to_string(&input).unwrap();
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let mut snap = GameStateSnapshot::default();
        snap.events.push(GameEvent::GameEnded {
            outcome: GameOutcome::Victory,
            score: 1200,
        });
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("MainMenu"));
        assert!(json.contains("GameEnded"));
    }
}
