#[cfg(test)]
mod tests {
    use tipjar_cli::{getters::get_recent_tips, instructions::send_tip_to_user};
    use tipjar_core::{identifier::Username, tip_jar::TipJar};

    use crate::fixtures::{test_builder::TestBuilder, TestResult};

    #[tokio::test]
    async fn test_no_tips_yet() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;

        let tips = get_recent_tips(&fixture.read_only_handler(), 5).await?;

        assert!(tips.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_tips_newest_first() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        fixture.register_creator("alice").await?;
        fixture.register_creator("bob").await?;
        let handler = fixture.handler(&fixture.funded_keypair(1.0));

        send_tip_to_user(&handler, "alice", "first", 1_000_000).await?;
        send_tip_to_user(&handler, "bob", "second", 2_000_000).await?;
        send_tip_to_user(&handler, "alice", "third", 3_000_000).await?;

        let tips = get_recent_tips(&handler, 2).await?;

        assert_eq!(tips.len(), 2);
        assert_eq!(tips[0].1.sender_name, "third");
        assert_eq!(tips[0].1.amount, 3_000_000);
        assert_eq!(tips[1].1.sender_name, "second");
        assert!(tips[0].1.timestamp > tips[1].1.timestamp);

        let alice = Username::new("alice")?;
        let (alice_jar, _, _) = TipJar::find_program_address(&fixture.program_id, &alice);
        assert_eq!(tips[0].1.receiver, alice_jar);
        Ok(())
    }

    #[tokio::test]
    async fn test_limit_larger_than_tip_count() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        fixture.register_creator("alice").await?;
        let handler = fixture.handler(&fixture.funded_keypair(1.0));

        send_tip_to_user(&handler, "alice", "Bob", 1_000_000).await?;

        let tips = get_recent_tips(&handler, 5).await?;

        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].1.sender_name, "Bob");
        Ok(())
    }
}
