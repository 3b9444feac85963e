use {super::*, serde_json::json};

fn listed(server: &TestServer, address: &str) -> bool {
  server
    .get_json::<api::Check>(&format!("/check/whitelist/{address}"))
    .listed
}

fn has_free_mint(server: &TestServer, discord_id: &str) -> bool {
  server
    .get_json::<api::FreeMint>(&format!("/freemint/check/{discord_id}"))
    .has_free_mint
}

fn add(
  server: &TestServer,
  path: &str,
  discord_id: &str,
  address: &str,
) -> reqwest::blocking::Response {
  server.post(
    path,
    json!({ "discordId": discord_id, "walletAddress": address }),
  )
}

#[test]
fn status_does_not_require_api_key() {
  let server = TestServer::spawn();

  let response = reqwest::blocking::get(server.url("/status")).unwrap();

  assert_eq!(response.status(), StatusCode::OK);

  pretty_assert_eq!(
    response.json::<api::Status>().unwrap(),
    api::Status {
      entries: 0,
      schema: 1,
    }
  );
}

#[test]
fn requests_without_api_key_are_forbidden() {
  let server = TestServer::spawn();

  let response = reqwest::blocking::get(server.url("/whitelist")).unwrap();
  assert_eq!(response.status(), StatusCode::FORBIDDEN);

  let response = reqwest::blocking::Client::new()
    .post(server.url("/whitelist"))
    .header("api-key", "wrong")
    .json(&json!({ "discordId": "u1", "walletAddress": A }))
    .send()
    .unwrap();
  assert_eq!(response.status(), StatusCode::FORBIDDEN);

  assert!(server.get_json::<Vec<Entry>>("/whitelist").is_empty());
}

#[test]
fn add_and_list_whitelist() {
  let server = TestServer::spawn();

  let response = add(&server, "/whitelist", "u1", A);
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(
    response.json::<api::Success>().unwrap(),
    api::Success { success: true }
  );

  pretty_assert_eq!(
    server.get_json::<serde_json::Value>("/whitelist"),
    json!([{
      "discordId": "u1",
      "walletAddress": A,
      "listKind": "whitelist",
      "maxSlots": 1,
      "viaCode": false,
    }])
  );

  assert!(server.get_json::<Vec<Entry>>("/freemint").is_empty());
}

#[test]
fn duplicate_entry_is_bad_request() {
  let server = TestServer::spawn();

  add(&server, "/whitelist", "u1", A);

  let message = server.assert_error(
    add(&server, "/whitelist", "u1", A),
    StatusCode::BAD_REQUEST,
    ErrorKind::DuplicateEntry,
  );

  assert_eq!(
    message,
    format!("{A} is already registered to u1 on the whitelist")
  );
}

#[test]
fn slot_limit_is_bad_request() {
  let server = TestServer::spawn();

  add(&server, "/whitelist", "u1", A);

  server.assert_error(
    add(&server, "/whitelist", "u1", B),
    StatusCode::BAD_REQUEST,
    ErrorKind::SlotLimitExceeded,
  );

  assert_eq!(
    add(&server, "/freemint", "u1", B).status(),
    StatusCode::OK
  );
}

#[test]
fn default_slots_apply_to_new_owners() {
  let server = TestServer::spawn_with_args(&["--default-slots", "2"]);

  assert_eq!(add(&server, "/whitelist", "u1", A).status(), StatusCode::OK);
  assert_eq!(add(&server, "/whitelist", "u1", B).status(), StatusCode::OK);

  server.assert_error(
    add(&server, "/whitelist", "u1", C),
    StatusCode::BAD_REQUEST,
    ErrorKind::SlotLimitExceeded,
  );
}

#[test]
fn invalid_address_is_bad_request() {
  let server = TestServer::spawn();

  server.assert_error(
    add(&server, "/whitelist", "u1", "0x1234"),
    StatusCode::BAD_REQUEST,
    ErrorKind::InvalidArgument,
  );
}

#[test]
fn replace_entry() {
  let server = TestServer::spawn();

  add(&server, "/whitelist", "u1", A);

  let replace = |old: &str, new: &str| {
    server.post(
      "/replacewhitelist",
      json!({ "discordId": "u1", "oldWallet": old, "newWallet": new }),
    )
  };

  assert_eq!(replace(A, B).status(), StatusCode::OK);

  server.assert_error(
    replace(A, C),
    StatusCode::NOT_FOUND,
    ErrorKind::EntryNotFound,
  );

  assert!(listed(&server, B));
  assert!(!listed(&server, A));
}

#[test]
fn replace_freemint() {
  let server = TestServer::spawn();

  add(&server, "/freemint", "u1", A);

  assert_eq!(
    server
      .post(
        "/replacefreemint",
        json!({ "discordId": "u1", "oldWallet": A, "newWallet": B }),
      )
      .status(),
    StatusCode::OK
  );

  pretty_assert_eq!(
    server
      .get_json::<Vec<Entry>>("/freemint")
      .into_iter()
      .map(|entry| entry.address.to_string())
      .collect::<Vec<String>>(),
    vec![B.to_string()]
  );
}

#[test]
fn freemint_check() {
  let server = TestServer::spawn();

  assert!(!has_free_mint(&server, "u1"));

  add(&server, "/freemint", "u1", A);

  assert!(has_free_mint(&server, "u1"));
  assert!(!has_free_mint(&server, "u2"));
}

#[test]
fn check_unknown_list_is_bad_request() {
  let server = TestServer::spawn();

  assert_eq!(
    server.get(&format!("/check/allowlist/{A}")).status(),
    StatusCode::BAD_REQUEST
  );
}

#[test]
fn export_whitelist() {
  let server = TestServer::spawn();

  add(&server, "/whitelist", "u2", B);
  add(&server, "/whitelist", "u1", A);
  add(&server, "/freemint", "u1", C);

  let response = server.get("/exportwhitelist");

  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(response.headers()["content-type"], "text/csv");
  assert_eq!(
    response.headers()["content-disposition"],
    "attachment; filename=\"whitelist.csv\""
  );

  pretty_assert_eq!(
    response.text().unwrap(),
    format!("{CSV_HEADER}u1,{A},whitelist,1,false\nu2,{B},whitelist,1,false\n")
  );

  pretty_assert_eq!(
    server.get("/exportfreemint").text().unwrap(),
    format!("{CSV_HEADER}u1,{C},freemint,1,false\n")
  );
}

#[test]
fn status_counts_entries() {
  let server = TestServer::spawn();

  add(&server, "/whitelist", "u1", A);
  add(&server, "/freemint", "u1", B);

  assert_eq!(server.get_json::<api::Status>("/status").entries, 2);
}
