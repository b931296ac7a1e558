//! Cross-layer scenarios driven through the inbound ports.

pub mod interception;
pub mod lifecycle;

/// Shared world-building helpers.
pub(crate) mod support {
    use chest_warden::domain::{BlockPos, Direction, Side, SignText};
    use chest_warden::ports::inbound::ContainerGuardApi;
    use chest_warden::ports::outbound::Actor;
    use chest_warden::test_utils::{Fixture, MemoryWorld};
    use uuid::Uuid;

    /// The protected chest every scenario starts from.
    pub const CHEST: BlockPos = BlockPos::new(10, 64, 10);

    /// Its governing sign, mounted on the chest's north face.
    pub const SIGN: BlockPos = BlockPos::new(10, 64, 9);

    pub fn owner() -> Actor {
        Actor::new(Uuid::from_u128(0xA11CE), "Alice", 0)
    }

    pub fn intruder() -> Actor {
        Actor::new(Uuid::from_u128(0xBAD), "Mallory", 0)
    }

    pub fn admin() -> Actor {
        Actor::new(Uuid::from_u128(0xAD), "Dana", 4)
    }

    pub fn private_sign(line1: &str, line2: &str, line3: &str) -> SignText {
        SignText::new(["[private]", line1, line2, line3])
    }

    /// Single chest at [`CHEST`] locked by [`owner`] with the given extra
    /// sign lines as the allow-list source.
    pub fn locked_chest_world(fx: &Fixture, lines: [&str; 3]) -> MemoryWorld {
        let mut world = MemoryWorld::new();
        world.put_single_chest(CHEST, Direction::North);

        let text = private_sign(lines[0], lines[1], lines[2]);
        world.put_wall_sign(SIGN, Direction::North, text.clone());

        let decision = fx
            .service
            .handle_sign_edit(&world, &owner(), SIGN, &text, Side::Front);
        assert!(decision.is_allowed(), "setup edit must create the lock");
        assert_eq!(fx.service.lock_count(), 1);

        fx.messenger.clear();
        world
    }

    /// Add a second, independently-owned locked barrel at `barrel`.
    pub fn add_locked_barrel(fx: &Fixture, world: &mut MemoryWorld, barrel: BlockPos, who: &Actor) {
        world.put_barrel(barrel);

        let sign = barrel.relative(Direction::West);
        let text = private_sign("", "", "");
        world.put_wall_sign(sign, Direction::West, text.clone());

        let decision = fx
            .service
            .handle_sign_edit(world, who, sign, &text, Side::Front);
        assert!(decision.is_allowed(), "setup edit must create the lock");

        fx.messenger.clear();
    }
}
