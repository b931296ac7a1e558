//! Lock lifecycle through the sign-edit state machine: creation, allow-list
//! updates, dissolution, and the guards around foreign signs.

#[cfg(test)]
mod tests {
    use crate::integration::support::{
        intruder, locked_chest_world, owner, private_sign, CHEST, SIGN,
    };
    use chest_warden::domain::{Block, BlockPos, Direction, Side, SignText};
    use chest_warden::ports::inbound::ContainerGuardApi;
    use chest_warden::ports::outbound::Actor;
    use chest_warden::test_utils::{fixture, MemoryWorld};
    use uuid::Uuid;

    #[test]
    fn marking_a_sign_private_creates_the_lock() {
        let fx = fixture();
        let mut world = MemoryWorld::new();
        world.put_single_chest(CHEST, Direction::North);

        let text = private_sign("", "", "");
        world.put_wall_sign(SIGN, Direction::North, text.clone());

        let decision = fx
            .service
            .handle_sign_edit(&world, &owner(), SIGN, &text, Side::Front);

        assert!(decision.is_allowed());
        let lock = fx.service.lock_at(CHEST).expect("lock must exist");
        assert_eq!(lock.owner_id, owner().id);
        assert_eq!(lock.owner_name, "Alice");
        assert_eq!(lock.sign_pos, SIGN);
        assert!(lock.allowed.is_empty());
        assert!(fx.service.is_dirty());
        assert_eq!(
            fx.messenger.last_message_for(owner().id).as_deref(),
            Some("Container is now protected. Only you and listed players can access it.")
        );
    }

    #[test]
    fn allow_list_merges_both_sides_and_drops_the_owner() {
        let fx = fixture();
        let mut world = MemoryWorld::new();
        world.put_single_chest(CHEST, Direction::North);
        world.put_wall_sign(SIGN, Direction::North, SignText::default());
        world.set_sign_text(SIGN, Side::Back, SignText::new(["", "dave", "", ""]));

        let proposed = private_sign("Bob, Alice", "", "");
        fx.service
            .handle_sign_edit(&world, &owner(), SIGN, &proposed, Side::Front);

        let lock = fx.service.lock_at(CHEST).expect("lock must exist");
        // Owner filtered out; the back side contributes without a marker.
        let allowed: Vec<&str> = lock.allowed.iter().map(String::as_str).collect();
        assert_eq!(allowed, vec!["Bob", "dave"]);
    }

    #[test]
    fn marker_fragments_never_become_usernames() {
        let fx = fixture();
        let _world = locked_chest_world(&fx, ["bob, [private]x", "", ""]);

        let lock = fx.service.lock_at(CHEST).expect("lock must exist");
        let allowed: Vec<&str> = lock.allowed.iter().map(String::as_str).collect();
        assert_eq!(allowed, vec!["bob"]);
    }

    #[test]
    fn updating_the_allow_list_preserves_creation_time() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["bob", "", ""]);
        let created_at = fx.service.lock_at(CHEST).unwrap().created_at;

        fx.clock.advance(60_000);
        let updated_text = private_sign("bob, Carol_Doe", "", "");
        let decision =
            fx.service
                .handle_sign_edit(&world, &owner(), SIGN, &updated_text, Side::Front);

        assert!(decision.is_allowed());
        let lock = fx.service.lock_at(CHEST).unwrap();
        assert_eq!(lock.allowed.len(), 2);
        assert_eq!(lock.created_at, created_at);
        assert_eq!(lock.updated_at, created_at + 60_000);
        assert_eq!(
            fx.messenger.last_message_for(owner().id).as_deref(),
            Some("Lock updated. 2 player(s) now have access.")
        );
    }

    #[test]
    fn allow_list_matching_is_normalized() {
        let fx = fixture();
        let world = locked_chest_world(&fx, [".Carol_Doe", "", ""]);

        // Cross-platform spelling on the sign, plain spelling in game.
        let carol = Actor::new(Uuid::from_u128(0xCA201), "carol doe", 0);
        assert!(fx.service.can_access(&world, &carol, CHEST).is_allowed());

        let stranger = Actor::new(Uuid::from_u128(0x57), "carol", 0);
        assert!(!fx.service.can_access(&world, &stranger, CHEST).is_allowed());
    }

    #[test]
    fn identical_reedit_changes_nothing() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["bob", "", ""]);
        let before = fx.service.lock_at(CHEST).unwrap();

        fx.clock.advance(1_000);
        let same_text = private_sign("bob", "", "");
        let decision = fx
            .service
            .handle_sign_edit(&world, &owner(), SIGN, &same_text, Side::Front);

        assert!(decision.is_allowed());
        let after = fx.service.lock_at(CHEST).unwrap();
        assert_eq!(after.updated_at, before.updated_at);
        assert!(fx.messenger.messages_for(owner().id).is_empty());
    }

    #[test]
    fn removing_the_marker_dissolves_the_lock() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["bob", "", ""]);

        let plain = SignText::new(["storage", "", "", ""]);
        let decision = fx
            .service
            .handle_sign_edit(&world, &owner(), SIGN, &plain, Side::Front);

        assert!(decision.is_allowed());
        assert_eq!(fx.service.lock_count(), 0);
        assert_eq!(
            fx.messenger.last_message_for(owner().id).as_deref(),
            Some("Lock removed from container.")
        );
    }

    #[test]
    fn marker_on_the_other_side_keeps_the_lock_alive() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);

        // Editing the back side without the marker does not dissolve while
        // the front still carries it.
        let back = SignText::new(["", "bob", "", ""]);
        let decision = fx
            .service
            .handle_sign_edit(&world, &owner(), SIGN, &back, Side::Back);

        assert!(decision.is_allowed());
        let lock = fx.service.lock_at(CHEST).expect("lock must survive");
        assert!(lock.allowed.contains("bob"));
    }

    #[test]
    fn strangers_cannot_edit_the_governing_sign() {
        let fx = fixture();
        let world = locked_chest_world(&fx, ["", "", ""]);

        let hijack = private_sign("Mallory", "", "");
        let decision =
            fx.service
                .handle_sign_edit(&world, &intruder(), SIGN, &hijack, Side::Front);

        assert!(!decision.is_allowed());
        assert_eq!(
            fx.messenger.last_message_for(intruder().id).as_deref(),
            Some("You cannot edit someone else's [private] sign.")
        );
        assert!(fx.service.lock_at(CHEST).unwrap().allowed.is_empty());
    }

    #[test]
    fn second_private_sign_on_a_locked_container_is_rejected() {
        let fx = fixture();
        let mut world = locked_chest_world(&fx, ["", "", ""]);

        // A second plaque on the east face of the same chest.
        let second_sign = CHEST.relative(Direction::East);
        let text = private_sign("Mallory", "", "");
        world.put_wall_sign(second_sign, Direction::East, text.clone());

        let decision =
            fx.service
                .handle_sign_edit(&world, &intruder(), second_sign, &text, Side::Front);

        assert!(!decision.is_allowed());
        assert_eq!(
            fx.messenger.last_message_for(intruder().id).as_deref(),
            Some("This container is already protected by another [private] sign.")
        );
        assert_eq!(fx.service.lock_at(CHEST).unwrap().sign_pos, SIGN);
    }

    #[test]
    fn sign_without_a_container_behind_it_passes_through() {
        let fx = fixture();
        let mut world = MemoryWorld::new();
        let sign = BlockPos::new(0, 70, 0);
        world.put(sign.relative(Direction::South), Block::Other);
        world.put_wall_sign(sign, Direction::North, SignText::default());

        let text = private_sign("", "", "");
        let decision = fx
            .service
            .handle_sign_edit(&world, &owner(), sign, &text, Side::Front);

        assert!(decision.is_allowed());
        assert_eq!(fx.service.lock_count(), 0);
    }

    #[test]
    fn dangling_lock_is_removed_on_first_access() {
        let fx = fixture();
        let mut world = locked_chest_world(&fx, ["", "", ""]);

        // Sign vanished without the subsystem seeing the break.
        world.clear(SIGN);

        let decision = fx.service.can_access(&world, &intruder(), CHEST);
        assert!(decision.is_allowed());
        assert_eq!(fx.service.lock_count(), 0);
    }
}
