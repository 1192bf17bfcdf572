#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use invaders_core::constants::{BOSS_SIZE, WORLD_HEIGHT, WORLD_WIDTH};
    use invaders_core::enums::{BossAttackKind, BossMovementKind};
    use invaders_core::gamedata::{BossAttackData, BossData, BossMovementData, EnemyData, GameData};
    use invaders_core::types::{Position, Velocity};

    use crate::boss::*;
    use crate::enemy::*;
    use crate::profiles::*;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn boss_area() -> BossArea {
        BossArea::for_size(BOSS_SIZE.0, BOSS_SIZE.1)
    }

    fn boss_ctx(x: f64, y: f64, player: Option<Position>) -> BossContext {
        BossContext {
            position: Position::new(x, y),
            player,
            area: boss_area(),
        }
    }

    fn enemy_ctx(y: f64, vy: f64, player: Option<Position>) -> EnemyContext {
        EnemyContext {
            position: Position::new(700.0, y),
            velocity: Velocity::new(0.0, vy),
            speed_y: 60.0,
            speed_x_range: None,
            min_y: 50.0,
            max_y: WORLD_HEIGHT / 2.0 + 50.0,
            player,
        }
    }

    fn movement(kind: BossMovementKind) -> BossMovementData {
        BossMovementData {
            kind,
            base_speed: Some(70.0),
            speed: None,
            burst_duration: None,
            pause_duration: None,
            patrol_distance: None,
            patrol_area: None,
            burst: None,
        }
    }

    fn boss_data(movement: Option<BossMovementData>) -> BossData {
        BossData {
            id: "test".into(),
            name: "Test".into(),
            sprite_key: None,
            hp: None,
            score_value: None,
            movement,
            attacks: vec![],
        }
    }

    // --- Profiles ---

    #[test]
    fn test_boss_profile_defaults() {
        let profile = boss_profile(&boss_data(None));
        assert_eq!(profile.hp, 500.0);
        assert_eq!(profile.score_value, 1000);
        assert_eq!(profile.movement.pattern, MovementPattern::Still);
        assert!(profile.attacks.is_empty());
    }

    #[test]
    fn test_random_burst_profile() {
        let profile = boss_profile(&boss_data(Some(movement(BossMovementKind::RandomBurst))));
        match profile.movement.pattern {
            MovementPattern::RandomBurst { burst, pause_ms } => {
                assert_eq!(burst.speed, 140.0);
                assert_eq!((burst.duration_min_ms, burst.duration_max_ms), (300, 600));
                assert_eq!(burst.target_player_chance, 0.1);
                assert_eq!(pause_ms, 1000.0);
            }
            other => panic!("unexpected pattern {other:?}"),
        }

        let aggressive = boss_profile(&boss_data(Some(movement(
            BossMovementKind::RandomBurstAggressive,
        ))));
        match aggressive.movement.pattern {
            MovementPattern::RandomBurst { burst, .. } => {
                assert_eq!(burst.target_player_chance, 0.8)
            }
            other => panic!("unexpected pattern {other:?}"),
        }
    }

    #[test]
    fn test_dynamic_patrol_without_area_sweeps() {
        let profile =
            boss_profile(&boss_data(Some(movement(BossMovementKind::DynamicPatrolBurst))));
        assert_eq!(
            profile.movement.pattern,
            MovementPattern::HorizontalPatrol { distance: 200.0 }
        );
    }

    #[test]
    fn test_spontaneous_burst_defaults() {
        let mut m = movement(BossMovementKind::PatrolHorizontal);
        m.burst = Some(Default::default());
        let profile = boss_profile(&boss_data(Some(m)));
        let burst = profile.movement.spontaneous_burst.unwrap();
        assert_eq!(burst.cooldown_ms, 2500.0);
        assert_eq!(burst.chance_per_second, 0.1);
        assert_eq!(burst.speed, 350.0);
        assert_eq!((burst.duration_min_ms, burst.duration_max_ms), (200, 500));
        assert_eq!(burst.target_player_chance, 0.6);
    }

    #[test]
    fn test_attack_defaults() {
        let attack = |kind| BossAttackData {
            id: "a".into(),
            name: None,
            kind,
            cooldown: 1000.0,
            weight: None,
            projectile_count: None,
            spread_angle: None,
            projectile_speed: None,
            damage: None,
            projectile_sprite_key: None,
            barrage_count: None,
            barrage_delay: None,
        };
        let spray = attack_profile(&attack(BossAttackKind::ProjectileSpray));
        assert_eq!(spray.weight, 1.0);
        assert_eq!(
            spray.pattern,
            AttackPattern::Spray {
                count: 5,
                spread_deg: 60.0,
                speed: 250.0,
                damage: 10.0
            }
        );
        let large = attack_profile(&attack(BossAttackKind::SpecialProjectileLarge));
        assert_eq!(large.pattern, AttackPattern::Large { speed: 150.0, damage: 30.0 });
        let barrage = attack_profile(&attack(BossAttackKind::ProjectileBarrage));
        assert_eq!(
            barrage.pattern,
            AttackPattern::Barrage {
                volleys: 3,
                delay_ms: 300.0,
                per_volley: 3,
                speed: 300.0,
                damage: 8.0
            }
        );
        assert_eq!(barrage.kind(), BossAttackKind::ProjectileBarrage);
    }

    #[test]
    fn test_enemy_profile_defaults() {
        let mut rng = rng();
        for _ in 0..50 {
            let p = enemy_profile(&EnemyData::default(), &mut rng);
            assert_eq!(p.hp, 20.0);
            assert_eq!(p.score_value, 10);
            assert!((40.0..=80.0).contains(&p.speed_y));
            assert!((50.0..=100.0).contains(&p.speed_x.abs()));
            assert!((1500.0..=3000.0).contains(&p.shoot_cooldown_ms));
            assert_eq!(p.bullet_damage, 5.0);
            assert_eq!(p.min_y, 50.0);
            assert_eq!(p.max_y, WORLD_HEIGHT / 2.0 + 50.0);
        }
    }

    #[test]
    fn test_builtin_bosses_resolve() {
        let data = GameData::builtin().unwrap();
        let nico = boss_profile(data.boss("nico").unwrap());
        assert_eq!(nico.attacks.len(), 3);
        assert!(matches!(
            nico.movement.pattern,
            MovementPattern::RandomBurst { .. }
        ));
    }

    // --- Boss brain ---

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI / 2.0) + FRAC_PI_2).abs() < 1e-9);
        assert!((wrap_angle(-3.0 * PI / 2.0) - FRAC_PI_2).abs() < 1e-9);
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_burst_aims_at_player() {
        let burst = BurstProfile {
            cooldown_ms: 0.0,
            chance_per_second: 0.0,
            speed: 100.0,
            duration_min_ms: 200,
            duration_max_ms: 200,
            target_player_chance: 1.0,
        };
        // Player straight to the right: no wall reached in 20 px.
        let ctx = boss_ctx(700.0, 150.0, Some(Position::new(900.0, 150.0)));
        let plan = plan_burst(&ctx, &burst, &mut rng());
        assert!(plan.angle.abs() < 1e-9);
        assert!(!plan.bounced);
        assert_eq!(plan.duration_ms, 200.0);
        assert!((plan.velocity.x - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_burst_bounces_off_side_wall() {
        let burst = BurstProfile {
            cooldown_ms: 0.0,
            chance_per_second: 0.0,
            speed: 400.0,
            duration_min_ms: 500,
            duration_max_ms: 500,
            target_player_chance: 1.0,
        };
        let area = boss_area();
        let ctx = boss_ctx(area.max_x - 10.0, 150.0, Some(Position::new(WORLD_WIDTH, 150.0)));
        let plan = plan_burst(&ctx, &burst, &mut rng());
        assert!(plan.bounced);
        assert!(plan.velocity.x < 0.0, "burst should head left, got {:?}", plan.velocity);
    }

    #[test]
    fn test_burst_bounces_off_band() {
        let burst = BurstProfile {
            cooldown_ms: 0.0,
            chance_per_second: 0.0,
            speed: 400.0,
            duration_min_ms: 500,
            duration_max_ms: 500,
            target_player_chance: 1.0,
        };
        // Player far below: the burst would leave the band and must flip up.
        let ctx = boss_ctx(700.0, 200.0, Some(Position::new(700.0, 750.0)));
        let plan = plan_burst(&ctx, &burst, &mut rng());
        assert!(plan.bounced);
        assert!(plan.velocity.y < 0.0);
    }

    #[test]
    fn test_random_heading_without_player() {
        let burst = BurstProfile {
            cooldown_ms: 0.0,
            chance_per_second: 0.0,
            speed: 10.0,
            duration_min_ms: 100,
            duration_max_ms: 100,
            target_player_chance: 1.0,
        };
        let ctx = boss_ctx(700.0, 150.0, None);
        let mut rng = rng();
        let a = plan_burst(&ctx, &burst, &mut rng);
        let b = plan_burst(&ctx, &burst, &mut rng);
        assert_ne!(a.angle, b.angle);
        assert!((a.velocity.speed() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_patrol_target_inside_area() {
        let ctx = boss_ctx(700.0, 150.0, None);
        let area = ctx.area;
        let mut rng = rng();
        for _ in 0..200 {
            let t = pick_patrol_target(&ctx, Some(2000.0), None, &mut rng);
            assert!(t.x >= area.min_x + 10.0 && t.x <= area.max_x - 10.0);
            assert!(t.y >= area.min_y && t.y <= area.max_y);
        }
    }

    #[test]
    fn test_horizontal_patrol_reverses() {
        let ctx = boss_ctx(810.0, 150.0, None);
        let (target, dir) = horizontal_patrol_target(&ctx, 700.0, 1.0, 200.0);
        assert_eq!(dir, -1.0);
        assert_eq!(target, Position::new(710.0, 150.0));

        let ctx = boss_ctx(750.0, 150.0, None);
        let (target, dir) = horizontal_patrol_target(&ctx, 700.0, 1.0, 200.0);
        assert_eq!(dir, 1.0);
        assert_eq!(target.x, 850.0);

        let area = boss_area();
        let ctx = boss_ctx(area.min_x, 150.0, None);
        let (_, dir) = horizontal_patrol_target(&ctx, area.min_x, -1.0, 10_000.0);
        assert_eq!(dir, 1.0);
    }

    #[test]
    fn test_constrain_reflects_at_half() {
        let area = boss_area();
        let mut pos = Position::new(area.min_x - 5.0, area.max_y + 5.0);
        let mut vel = Velocity::new(-100.0, 40.0);
        assert!(constrain(&mut pos, &mut vel, &area));
        assert_eq!(pos, Position::new(area.min_x, area.max_y));
        assert_eq!(vel, Velocity::new(50.0, -20.0));

        let mut pos = Position::new(700.0, 150.0);
        let mut vel = Velocity::new(10.0, 10.0);
        assert!(!constrain(&mut pos, &mut vel, &area));
    }

    #[test]
    fn test_select_attack_respects_weights() {
        let mut rng = rng();
        let ready = [(0, 9.0), (2, 1.0)];
        let mut counts = [0usize; 3];
        for _ in 0..2000 {
            counts[select_attack(&ready, &mut rng).unwrap()] += 1;
        }
        assert_eq!(counts[1], 0);
        assert!(counts[0] > counts[2] * 4, "counts {counts:?}");
        assert!(select_attack(&[], &mut rng).is_none());
    }

    #[test]
    fn test_spray_angles_even_fan() {
        let angles = spray_angles(0.0, 5, 60.0);
        assert_eq!(angles.len(), 5);
        assert!((angles[0] + 30f64.to_radians()).abs() < 1e-9);
        assert!(angles[2].abs() < 1e-9);
        assert!((angles[4] - 30f64.to_radians()).abs() < 1e-9);

        let single = spray_angles(1.0, 1, 60.0);
        assert!((single[0] - (1.0 - 30f64.to_radians())).abs() < 1e-9);
    }

    #[test]
    fn test_burst_chance_scales_with_dt() {
        assert!((burst_chance(0.1, 1000.0) - 0.1).abs() < 1e-12);
        assert!((burst_chance(0.6, 1000.0 / 60.0) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_arrival_threshold() {
        let a = Position::new(0.0, 0.0);
        assert!(has_arrived(&a, &Position::new(1.9, 0.0), 60.0, 1000.0 / 60.0));
        assert!(!has_arrived(&a, &Position::new(2.1, 0.0), 60.0, 1000.0 / 60.0));
    }

    // --- Enemy brain ---

    #[test]
    fn test_enemy_homes_or_wanders() {
        let mut rng = rng();
        let player = Position::new(400.0, 700.0);
        let ctx = enemy_ctx(100.0, 60.0, Some(player));
        let mut saw_homing = false;
        for _ in 0..200 {
            let speed = choose_horizontal_speed(&ctx, &mut rng);
            // Homing always heads left (player is to the left) at 40-80;
            // wandering is 50-100 either way.
            if speed < 0.0 && speed.abs() < 50.0 {
                saw_homing = true;
            }
            assert!(speed.abs() >= 40.0 && speed.abs() <= 100.0);
        }
        assert!(saw_homing);
    }

    #[test]
    fn test_enemy_dead_zone() {
        let mut rng = rng();
        // Player directly below: homing yields 0, wandering 50-100.
        let ctx = enemy_ctx(100.0, 60.0, Some(Position::new(705.0, 700.0)));
        let zeros = (0..200)
            .filter(|_| choose_horizontal_speed(&ctx, &mut rng) == 0.0)
            .count();
        assert!(zeros > 0);
    }

    #[test]
    fn test_enemy_never_homes_when_below_player() {
        let mut rng = rng();
        let ctx = enemy_ctx(500.0, 60.0, Some(Position::new(100.0, 520.0)));
        for _ in 0..100 {
            let speed = choose_horizontal_speed(&ctx, &mut rng);
            assert!(speed.abs() >= 50.0);
        }
    }

    #[test]
    fn test_vertical_bounce() {
        let mut rng = rng();
        let low = enemy_ctx(WORLD_HEIGHT / 2.0 + 60.0, 60.0, None);
        let bounce = vertical_bounce(&low, &mut rng).unwrap();
        assert!(bounce.velocity_y <= -24.0 && bounce.velocity_y >= -42.0);
        assert!(bounce.steer);
        let delay = bounce.steer_delay_ms.unwrap();
        assert!((300.0..=1000.0).contains(&delay));

        let high = enemy_ctx(40.0, -30.0, None);
        let bounce = vertical_bounce(&high, &mut rng).unwrap();
        assert_eq!(bounce.velocity_y, 60.0);
        assert!(!bounce.steer);

        let mid = enemy_ctx(200.0, 60.0, None);
        assert!(vertical_bounce(&mid, &mut rng).is_none());
    }

    #[test]
    fn test_wall_bounce() {
        assert_eq!(wall_bounce(10.0, -70.0, -70.0, 16.0, 1384.0), Some(70.0));
        assert_eq!(wall_bounce(1390.0, 70.0, 70.0, 16.0, 1384.0), Some(-70.0));
        assert_eq!(wall_bounce(10.0, -5.0, 0.0, 16.0, 1384.0), Some(50.0));
        assert_eq!(wall_bounce(500.0, 70.0, 70.0, 16.0, 1384.0), None);
    }

    #[test]
    fn test_shot_speed_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let s = shot_speed(&mut rng);
            assert!((270.0..=330.0).contains(&s));
        }
        let v = aim_velocity(&Position::new(0.0, 0.0), &Position::new(3.0, 4.0), 300.0);
        assert!((v.x - 180.0).abs() < 1e-9 && (v.y - 240.0).abs() < 1e-9);
    }
}
