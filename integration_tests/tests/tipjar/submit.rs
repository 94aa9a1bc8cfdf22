#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use solana_sdk::{
        signature::{Keypair, Signer},
        transaction::Transaction,
    };
    use tipjar_cli::{
        getters::get_tip_jar_stats,
        instructions::{send_tip_to_user, submit, Action},
        ledger::Ledger,
    };
    use tipjar_core::{
        error::TipjarError,
        identifier::Username,
        instruction,
        platform::Platform,
        platform_vault::PlatformVault,
        tip_jar::TipJar,
        user_profile::UserProfile,
    };

    use crate::fixtures::{test_builder::TestBuilder, TestResult};

    #[tokio::test]
    async fn test_concurrent_duplicate_is_in_flight() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        fixture.register_creator("alice").await?;
        let handler = fixture.handler(&fixture.funded_keypair(1.0));
        fixture.ledger.set_send_delay(Duration::from_millis(100));

        let (first, second) = futures::join!(
            send_tip_to_user(&handler, "alice", "Bob", 1_000_000),
            send_tip_to_user(&handler, "alice", "Bob", 1_000_000),
        );

        assert!(first.is_ok());
        assert_matches!(
            second,
            Err(TipjarError::InFlight {
                operation: "send_tip_to_user",
                ..
            })
        );

        let alice = Username::new("alice")?;
        let (tipjar, _, _) = TipJar::find_program_address(&fixture.program_id, &alice);
        assert!(!handler.in_flight().is_busy("send_tip_to_user", &tipjar));

        let stats = get_tip_jar_stats(&handler, &alice).await?.unwrap();
        assert_eq!(stats.tip_jar.total_tips, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_different_targets_do_not_block() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        fixture.register_creator("alice").await?;
        fixture.register_creator("bob").await?;
        let handler = fixture.handler(&fixture.funded_keypair(1.0));
        fixture.ledger.set_send_delay(Duration::from_millis(20));

        let (to_alice, to_bob) = futures::join!(
            send_tip_to_user(&handler, "alice", "Carol", 1_000_000),
            send_tip_to_user(&handler, "bob", "Carol", 1_000_000),
        );

        assert!(to_alice.is_ok());
        assert!(to_bob.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_timeout_is_network_failure() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        fixture.register_creator("alice").await?;
        let handler = fixture
            .handler(&fixture.funded_keypair(1.0))
            .with_timeout(Duration::from_millis(20));
        fixture.ledger.set_send_delay(Duration::from_millis(500));

        let result = send_tip_to_user(&handler, "alice", "Bob", 1_000_000).await;

        assert_matches!(result, Err(TipjarError::NetworkFailure(_)));
        assert!(result.unwrap_err().is_retryable());

        let alice = Username::new("alice")?;
        let stats = get_tip_jar_stats(&handler, &alice).await?.unwrap();
        assert_eq!(stats.tip_jar.total_tips, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_missing_tip_signer() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        fixture.register_creator("alice").await?;
        let fan = fixture.funded_keypair(1.0);
        let handler = fixture.handler(&fan);
        let sends = fixture.ledger.send_count();

        let alice = Username::new("alice")?;
        let program_id = &fixture.program_id;
        let (tipjar, _, _) = TipJar::find_program_address(program_id, &alice);
        let operation = instruction::send_tip_to_user(
            Platform::find_program_address(program_id).0,
            PlatformVault::find_program_address(program_id).0,
            UserProfile::find_program_address(program_id, &alice).0,
            tipjar,
            Keypair::new().pubkey(),
            fan.pubkey(),
            "alice".to_string(),
            "Bob".to_string(),
            1_000_000,
        );

        let result = submit(&handler, Action::new(operation, tipjar)).await;

        assert_matches!(result, Err(TipjarError::SigningFailed(_)));
        assert_eq!(fixture.ledger.send_count(), sends);
        Ok(())
    }

    #[tokio::test]
    async fn test_resent_transaction_is_duplicate() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        fixture.register_creator("alice").await?;
        let creator = fixture.funded_keypair(1.0);

        let program_id = &fixture.program_id;
        let alice = Username::new("alice")?;
        let tip = Keypair::new();
        let operation = instruction::send_tip_to_user(
            Platform::find_program_address(program_id).0,
            PlatformVault::find_program_address(program_id).0,
            UserProfile::find_program_address(program_id, &alice).0,
            TipJar::find_program_address(program_id, &alice).0,
            tip.pubkey(),
            creator.pubkey(),
            "alice".to_string(),
            "Bob".to_string(),
            1_000_000,
        );
        let blockhash = fixture.ledger.get_latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            &[operation.to_instruction(program_id)],
            Some(&creator.pubkey()),
            &[&creator, &tip],
            blockhash,
        );

        fixture
            .ledger
            .send_and_confirm_transaction(&transaction)
            .await?;
        let result = fixture
            .ledger
            .send_and_confirm_transaction(&transaction)
            .await;

        assert_matches!(result, Err(TipjarError::DuplicateRequest(_)));
        assert!(!result.unwrap_err().is_retryable());
        Ok(())
    }
}
