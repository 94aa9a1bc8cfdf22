#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use solana_sdk::{account::Account, pubkey::Pubkey, signature::Signer};
    use tipjar_cli::getters::{
        fetch_record, fetch_records, get_creator_overview, get_tip_jar, get_user_profile,
    };
    use tipjar_core::{
        account::TipjarAccount, error::TipjarError, identifier::Username, platform::Platform,
        tip_jar::TipJar,
    };

    use crate::fixtures::{test_builder::TestBuilder, TestResult};

    #[tokio::test]
    async fn test_fetch_absent_account_is_not_found() -> TestResult<()> {
        let fixture = TestBuilder::new();
        let handler = fixture.read_only_handler();
        let alice = Username::new("alice")?;

        let fetch = get_tip_jar(&handler, &alice).await?;

        assert!(fetch.is_not_found());
        assert!(fetch.metadata().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_returns_record_and_storage_metadata() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        let creator = fixture.register_creator("alice").await?;
        let handler = fixture.read_only_handler();

        let alice = Username::new("alice")?;
        let (address, _, _) = TipJar::find_program_address(&fixture.program_id, &alice);
        let (tip_jar, metadata) = fetch_record::<TipJar>(&handler, &address)
            .await?
            .found(&address)?;

        assert_eq!(tip_jar.authority, creator.pubkey());
        assert_eq!(tip_jar.username, "alice");
        assert_eq!(metadata.data_len, TipJar::SPACE);
        assert_eq!(metadata.lamports, fixture.ledger.lamports(&address));
        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_account_type_is_schema_mismatch() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        let handler = fixture.read_only_handler();

        let (platform, _, _) = Platform::find_program_address(&fixture.program_id);
        let result = fetch_record::<TipJar>(&handler, &platform).await;

        assert_matches!(
            result,
            Err(TipjarError::SchemaMismatch { account: "TipJar", .. })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_garbage_data_is_schema_mismatch() -> TestResult<()> {
        let fixture = TestBuilder::new();
        let handler = fixture.read_only_handler();

        let address = Pubkey::new_unique();
        fixture.ledger.set_account(
            address,
            Account {
                lamports: 1_000_000,
                data: vec![7; 12],
                owner: fixture.program_id,
                executable: false,
                rent_epoch: 0,
            },
        );

        assert_matches!(
            fetch_record::<Platform>(&handler, &address).await,
            Err(TipjarError::SchemaMismatch { .. })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_prefunded_address_is_not_found() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        let handler = fixture.read_only_handler();

        let alice = Username::new("alice")?;
        let (address, _, _) = TipJar::find_program_address(&fixture.program_id, &alice);
        fixture.ledger.airdrop(&address, 1_000);

        assert!(get_tip_jar(&handler, &alice).await?.is_not_found());

        let overview = get_creator_overview(&handler, &alice).await?;
        assert!(!overview.exists());
        assert!(overview.tip_jar.is_none());

        fixture.register_creator("alice").await?;
        let tip_jar = get_tip_jar(&handler, &alice).await?.into_record().unwrap();
        assert_eq!(tip_jar.username, "alice");
        Ok(())
    }

    #[tokio::test]
    async fn test_account_owned_by_another_program_is_schema_mismatch() -> TestResult<()> {
        let fixture = TestBuilder::new();
        let handler = fixture.read_only_handler();

        let alice = Username::new("alice")?;
        let (address, _, _) = TipJar::find_program_address(&fixture.program_id, &alice);
        fixture.ledger.set_account(
            address,
            Account {
                lamports: 1_000_000,
                data: TipJar::new(Pubkey::new_unique(), &alice).to_account_data(),
                owner: Pubkey::new_unique(),
                executable: false,
                rent_epoch: 0,
            },
        );

        assert_matches!(
            get_tip_jar(&handler, &alice).await,
            Err(TipjarError::SchemaMismatch { account: "TipJar", .. })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_reads_are_independent() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        fixture.register_creator("alice").await?;
        let handler = fixture.read_only_handler();

        let alice = Username::new("alice")?;
        let bob = Username::new("bob")?;
        let (alice_jar, bob_jar) = futures::try_join!(
            get_tip_jar(&handler, &alice),
            get_tip_jar(&handler, &bob)
        )?;

        assert_eq!(alice_jar.record().map(|t| t.username.as_str()), Some("alice"));
        assert!(bob_jar.is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn test_batched_fetch_keeps_positions() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        fixture.register_creator("alice").await?;
        fixture.register_creator("carol").await?;
        let handler = fixture.read_only_handler();

        let addresses: Vec<Pubkey> = ["alice", "bob", "carol"]
            .into_iter()
            .map(|name| {
                let username = Username::new(name).unwrap();
                TipJar::find_program_address(&fixture.program_id, &username).0
            })
            .collect();
        let fetches = fetch_records::<TipJar>(&handler, &addresses).await?;

        assert_eq!(fetches.len(), 3);
        assert_eq!(fetches[0].record().map(|t| t.username.as_str()), Some("alice"));
        assert!(fetches[1].is_not_found());
        assert_eq!(fetches[2].record().map(|t| t.username.as_str()), Some("carol"));
        Ok(())
    }

    #[tokio::test]
    async fn test_creator_overview_of_unknown_creator() -> TestResult<()> {
        let fixture = TestBuilder::new();
        fixture.initialize_platform().await?;
        let handler = fixture.read_only_handler();

        let overview = get_creator_overview(&handler, &Username::new("nobody")?).await?;

        assert!(!overview.exists());
        assert!(overview.profile.is_none());
        assert!(overview.tip_jar.is_none());
        assert!(overview.platform.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_transport_failure_is_retryable() -> TestResult<()> {
        let fixture = TestBuilder::new();
        let handler = fixture.read_only_handler();
        fixture.ledger.set_offline(true);

        let result = get_user_profile(&handler, &Username::new("alice")?).await;

        assert_matches!(result, Err(TipjarError::NetworkFailure(_)));
        assert!(result.unwrap_err().is_retryable());
        Ok(())
    }
}
