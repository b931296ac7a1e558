//! The interception shims: open, break, placement, automation, and the
//! fire/explosion protection predicate.

#[cfg(test)]
mod tests {
    use crate::integration::support::{admin, intruder, locked_chest_world, owner, CHEST, SIGN};
    use chest_warden::config::WardenConfig;
    use chest_warden::domain::{BlockPos, Direction};
    use chest_warden::ports::inbound::ContainerGuardApi;
    use chest_warden::test_utils::{fixture, fixture_with, SyncEvent};

    #[test]
    fn open_is_denied_for_strangers_and_allowed_for_listed_players() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["Mallory", "", ""]);

        assert!(fx.service.on_open(&world, &owner(), CHEST).is_allowed());
        assert!(fx.service.on_open(&world, &intruder(), CHEST).is_allowed());

        let mut stranger = intruder();
        stranger.name = "Eve".to_string();
        stranger.id = uuid::Uuid::from_u128(0xE7E);
        let decision = fx.service.on_open(&world, &stranger, CHEST);
        assert_eq!(
            decision.reason(),
            Some("Cannot open Alice's private chest. Permission denied.")
        );
        assert_eq!(
            fx.messenger.last_message_for(stranger.id).as_deref(),
            decision.reason()
        );
    }

    #[test]
    fn admins_open_anything() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);
        assert!(fx.service.on_open(&world, &admin(), CHEST).is_allowed());
    }

    #[test]
    fn owner_pairing_extends_the_lock_on_the_next_tick() {
        let fx = fixture();
        let mut world = locked_chest_world(&fx, ["", "", ""]);
        let created_at = fx.service.lock_at(CHEST).unwrap().created_at;

        // Chest faces north, so its pair partner sits one block east.
        let partner = CHEST.relative(Direction::East);
        let decision = fx.service.on_place_chest(&world, &owner(), partner);
        assert!(decision.is_allowed());

        // The host commits the placement and re-pairs both halves, then
        // ticks.
        world.put_paired_chest(CHEST, partner, Direction::North);
        fx.clock.advance(5_000);
        fx.service.tick(&world);

        let lock = fx.service.lock_at(partner).expect("lock covers the pair");
        assert_eq!(lock.container_positions.len(), 2);
        assert_eq!(lock.created_at, created_at);
        assert_eq!(lock.updated_at, created_at + 5_000);
        assert_eq!(fx.service.lock_count(), 1);
    }

    #[test]
    fn uncommitted_placement_extends_nothing() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);

        let partner = CHEST.relative(Direction::East);
        fx.service.on_place_chest(&world, &owner(), partner);
        // Placement was cancelled elsewhere; the world never changed.
        fx.service.tick(&world);

        assert_eq!(
            fx.service.lock_at(CHEST).unwrap().container_positions.len(),
            1
        );
    }

    #[test]
    fn stranger_cannot_place_a_chest_against_a_locked_one() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);

        let partner = CHEST.relative(Direction::East);
        let decision = fx.service.on_place_chest(&world, &intruder(), partner);

        assert!(!decision.is_allowed());
        assert_eq!(
            fx.messenger.last_message_for(intruder().id).as_deref(),
            Some("You cannot place a chest next to someone else's locked chest.")
        );
        assert!(fx
            .sync
            .events()
            .contains(&SyncEvent::Inventory(intruder().id)));

        fx.service.tick(&world);
        assert_eq!(
            fx.service.lock_at(CHEST).unwrap().container_positions.len(),
            1
        );
    }

    #[test]
    fn stranger_cannot_place_a_sign_on_a_locked_container() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);

        let decision = fx.service.on_place_sign(&world, &intruder(), CHEST);
        assert!(!decision.is_allowed());
        assert!(fx
            .sync
            .events()
            .contains(&SyncEvent::Inventory(intruder().id)));

        assert!(fx.service.on_place_sign(&world, &owner(), CHEST).is_allowed());
    }

    #[test]
    fn owner_break_removes_the_lock() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);

        let decision = fx.service.on_break(&world, &owner(), CHEST);

        assert!(decision.is_allowed());
        assert_eq!(fx.service.lock_count(), 0);
        assert_eq!(
            fx.messenger.last_message_for(owner().id).as_deref(),
            Some("Locked container broken. Lock has been removed.")
        );
    }

    #[test]
    fn stranger_break_is_denied_and_resyncs_the_client() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);

        let decision = fx.service.on_break(&world, &intruder(), CHEST);

        assert!(!decision.is_allowed());
        assert_eq!(fx.service.lock_count(), 1);
        let events = fx.sync.events();
        assert!(events.contains(&SyncEvent::Block(intruder().id, CHEST)));
        assert!(events.contains(&SyncEvent::BlockEntity(intruder().id, CHEST)));
    }

    #[test]
    fn governing_sign_break_follows_the_same_ownership_rules() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);

        let denied = fx.service.on_break(&world, &intruder(), SIGN);
        assert!(!denied.is_allowed());
        assert_eq!(
            fx.messenger.last_message_for(intruder().id).as_deref(),
            Some("You cannot break someone else's [private] sign.")
        );

        assert!(fx.service.on_break(&world, &admin(), SIGN).is_allowed());
        assert!(fx.service.on_break(&world, &owner(), SIGN).is_allowed());
    }

    #[test]
    fn automation_is_blocked_for_every_actor() {
        let fx = fixture();
        let mut world = locked_chest_world(&fx, ["Mallory", "", ""]);

        // Listed players get in by hand, but hoppers never do.
        assert!(fx.service.is_automation_blocked(&world, CHEST));

        let free_barrel = BlockPos::new(0, 64, 0);
        world.put_barrel(free_barrel);
        assert!(!fx.service.is_automation_blocked(&world, free_barrel));
    }

    #[test]
    fn fire_and_explosions_spare_the_lock_and_its_sign() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);

        assert!(fx.service.is_protected(&world, CHEST));
        assert!(fx.service.is_protected(&world, SIGN));
        assert!(!fx.service.is_protected(&world, BlockPos::new(0, 64, 0)));

        let mut affected = vec![CHEST, SIGN, BlockPos::new(0, 64, 0)];
        fx.service.filter_explosion(&world, &mut affected);
        assert_eq!(affected, vec![BlockPos::new(0, 64, 0)]);
    }

    #[test]
    fn banned_owner_suspends_all_protection() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);

        fx.directory.ban(owner().id);

        assert!(fx.service.on_open(&world, &intruder(), CHEST).is_allowed());
        assert!(!fx.service.is_automation_blocked(&world, CHEST));
        assert!(!fx.service.is_protected(&world, CHEST));
        assert!(fx.service.on_break(&world, &intruder(), CHEST).is_allowed());
        // The bypassed break leaves the record in place.
        assert_eq!(fx.service.lock_count(), 1);
    }

    #[test]
    fn ban_bypass_can_be_disabled_in_config() {
        let config = WardenConfig {
            disable_protection_if_owner_banned: false,
            ..WardenConfig::default()
        };
        let fx = fixture_with(config, 1_000_000);
        let world = locked_chest_world(&fx, ["", "", ""]);

        fx.directory.ban(owner().id);

        assert!(!fx.service.on_open(&world, &intruder(), CHEST).is_allowed());
        assert!(fx.service.is_automation_blocked(&world, CHEST));
    }
}
