use validator_report::{
    build_report, render_report, report::Section, Address, DashboardApiHttp, DashboardConfig,
    Palette, ReportOptions,
};

const ADDRESS: &str = "0xAbCdEf0123456789abcdef0123456789ABCDEF01";

async fn mock_json(server: &mut mockito::ServerGuard, path: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_report_survives_blocked_network_summary() {
    let mut server = mockito::Server::new_async().await;
    let address: Address = ADDRESS.parse().unwrap();

    let network = server
        .mock("GET", "/api/v1/network/summary")
        .with_status(403)
        .with_header("cf-mitigated", "challenge")
        .with_body("<html>Just a moment...</html>")
        .create_async()
        .await;
    let validator = mock_json(
        &mut server,
        &format!("/api/v1/validators/{address}"),
        r#"{"data": {"status": "active_online", "balance": "32000000000000000000", "attestationsSucceeded": 9, "attestationsMissed": 1}}"#,
    )
    .await;
    let slashings = mock_json(
        &mut server,
        "/api/v1/slashings",
        &format!(r#"{{"events": [{{"address": "{ADDRESS}", "epoch": 42}}, {{"address": "0x0000000000000000000000000000000000000000"}}]}}"#),
    )
    .await;
    let accusations = mock_json(
        &mut server,
        &format!("/api/v1/validators/{address}/accusations"),
        "[]",
    )
    .await;
    let leaderboard = mock_json(
        &mut server,
        "/api/v1/leaderboard",
        &format!(r#"["0x1111111111111111111111111111111111111111", "{ADDRESS}"]"#),
    )
    .await;

    let api = DashboardApiHttp::new(&DashboardConfig::new(&server.url())).unwrap();
    let report = build_report(&api, &address, &ReportOptions::new("ETH")).await;

    network.assert_async().await;
    validator.assert_async().await;
    slashings.assert_async().await;
    accusations.assert_async().await;
    leaderboard.assert_async().await;

    assert!(matches!(report.network, Section::Unavailable(_)));
    assert!(report.needs_bypass_token());

    let text = render_report(&report, &Palette::plain());
    assert!(text.contains(
        "Network\n  unavailable, blocked by the dashboard's bot protection\n  \
         Current epoch       unknown\n  \
         Finalized epoch     unknown\n  \
         Validators          unknown active of unknown"
    ));
    assert!(text.contains("  Status              active_online"));
    assert!(text.contains("  Balance             32.000000 ETH"));
    assert!(text.contains("  Attestation rate    90.0%"));
    assert!(text.contains("  Matching events     1 of 2 total"));
    assert!(text.contains("  Accusations         none"));
    assert!(text.contains("  Window              dashboard default"));
    assert!(text.contains("  Rank                #2"));
    assert!(text.contains("validator-report login"));
}

#[tokio::test]
async fn test_unknown_validator_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let address: Address = ADDRESS.parse().unwrap();

    mock_json(&mut server, "/api/v1/network/summary", r#"{"currentEpoch": 300}"#).await;
    server
        .mock("GET", format!("/api/v1/validators/{address}").as_str())
        .with_status(404)
        .create_async()
        .await;
    mock_json(&mut server, "/api/v1/slashings", "[]").await;
    mock_json(
        &mut server,
        &format!("/api/v1/validators/{address}/accusations"),
        r#"{"accusations": []}"#,
    )
    .await;
    let leaderboard = server
        .mock("GET", "/api/v1/leaderboard")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("startEpoch".into(), "76".into()),
            mockito::Matcher::UrlEncoded("endEpoch".into(), "300".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let api = DashboardApiHttp::new(&DashboardConfig::new(&server.url())).unwrap();
    let report = build_report(&api, &address, &ReportOptions::new("ETH")).await;
    leaderboard.assert_async().await;

    let text = render_report(&report, &Palette::plain());
    assert!(text.contains(
        "Validator\n  unavailable, not found\n  Status              unknown\n  \
         Balance             unknown"
    ));
    assert!(text.contains("  Current epoch       300"));
    assert!(text.contains("  Window              epochs [76, 300]"));
    assert!(text.contains("  Rank                not ranked"));
    assert!(!text.contains("validator-report login"));
}
