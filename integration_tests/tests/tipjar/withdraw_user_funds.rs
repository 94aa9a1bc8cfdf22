#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use solana_sdk::signature::Signer;
    use tipjar_cli::{
        getters::get_tip_jar_stats,
        instructions::{send_tip_to_user, withdraw_user_funds},
    };
    use tipjar_core::{
        account::TipjarAccount,
        error::{TipjarError, TipjarProgramError},
        identifier::Username,
        tip_jar::TipJar,
    };

    use crate::fixtures::{
        test_builder::TestBuilder, test_ledger::LAMPORTS_PER_SIGNATURE, TestResult,
    };

    #[tokio::test]
    async fn test_withdraw_user_funds_ok() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        let creator = fixture.register_creator("alice").await?;
        send_tip_to_user(
            &fixture.handler(&fixture.funded_keypair(1.0)),
            "alice",
            "Bob",
            10_000_000,
        )
        .await?;

        let handler = fixture.handler(&creator);
        let balance_before = fixture.ledger.lamports(&creator.pubkey());
        withdraw_user_funds(&handler, "alice").await?;

        let withdrawn = 9_700_000;
        assert_eq!(
            fixture.ledger.lamports(&creator.pubkey()),
            balance_before + withdrawn - LAMPORTS_PER_SIGNATURE
        );

        let alice = Username::new("alice")?;
        let stats = get_tip_jar_stats(&handler, &alice).await?.unwrap();
        assert_eq!(stats.tip_jar.total_withdrawals, withdrawn);
        assert!(!stats.balance.has_withdrawable());

        let (tipjar, _, _) = TipJar::find_program_address(&fixture.program_id, &alice);
        assert_eq!(
            fixture.ledger.lamports(&tipjar),
            fixture.ledger.minimum_balance(TipJar::SPACE)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_withdraw_nothing_is_not_submitted() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        let creator = fixture.register_creator("alice").await?;
        let sends = fixture.ledger.send_count();

        let result = withdraw_user_funds(&fixture.handler(&creator), "alice").await;

        assert_matches!(result, Err(TipjarError::InsufficientFunds(_)));
        assert_eq!(fixture.ledger.send_count(), sends);
        Ok(())
    }

    #[tokio::test]
    async fn test_withdraw_unknown_tip_jar_fails_closed() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        let sends = fixture.ledger.send_count();

        let result =
            withdraw_user_funds(&fixture.handler(&fixture.funded_keypair(1.0)), "ghost").await;

        assert_matches!(result, Err(TipjarError::NotFound(_)));
        assert_eq!(fixture.ledger.send_count(), sends);
        Ok(())
    }

    #[tokio::test]
    async fn test_withdraw_someone_elses_tip_jar() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        fixture.register_creator("alice").await?;
        send_tip_to_user(
            &fixture.handler(&fixture.funded_keypair(1.0)),
            "alice",
            "Bob",
            10_000_000,
        )
        .await?;

        let thief = fixture.handler(&fixture.funded_keypair(1.0));
        let result = withdraw_user_funds(&thief, "alice").await;

        assert_matches!(
            result,
            Err(TipjarError::DomainRejected { code, .. }) if code == TipjarProgramError::Unauthorized.code()
        );
        Ok(())
    }
}
