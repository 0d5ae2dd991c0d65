use haapi_core::{Endpoint, HttpMethod};

use super::{EndpointOperation, Param};

/// Declare a catalog entry.
macro_rules! operation {
    (
        $name:literal, $method:ident $endpoint:ident, api_key: $api_key:literal,
        [$($param:expr),* $(,)?]
    ) => {
        EndpointOperation {
            name: $name,
            endpoint: Endpoint::$endpoint,
            method: HttpMethod::$method,
            api_key: $api_key,
            params: &[$($param),*],
        }
    };
}

/// Every operation the dispatcher knows, registered at startup.
pub static CATALOG: &[EndpointOperation] = &[
    // ----- Account -----
    operation!("ankama.account.status", Get AccountStatus, api_key: true, []),
    operation!("ankama.account.account", Get AccountAccount, api_key: true, []),
    operation!("ankama.account.createToken", Get AccountCreateToken, api_key: true, [
        Param::query("game"),
        Param::query_opt("certificate_id"),
        Param::query_opt("certificate_hash"),
    ]),
    operation!("ankama.account.signOnWithApiKey", Post AccountSignOnWithApiKey, api_key: true, [
        Param::form("game"),
    ]),
    operation!("ankama.account.setNickname", Post AccountSetNickname, api_key: true, [
        Param::form("nickname"),
        Param::form_opt("lang"),
    ]),
    operation!("ankama.account.sendMailValidation", Get AccountSendMailValidation, api_key: true, [
        Param::query_opt("lang"),
    ]),
    // ----- Api keys -----
    operation!("ankama.api.createApiKey", Post ApiCreateApiKey, api_key: false, [
        Param::form("login"),
        Param::form("password"),
        Param::form_opt("long_life_token"),
        Param::form_opt("game_id"),
    ]),
    operation!("ankama.api.refreshApiKey", Post ApiRefreshApiKey, api_key: false, [
        Param::form("refresh_token"),
        Param::form_opt("long_life_token"),
    ]),
    operation!("ankama.api.deleteApiKey", Get ApiDeleteApiKey, api_key: true, []),
    // ----- Game sessions -----
    operation!(
        "ankama.game.startSessionWithApiKey", Post GameStartSessionWithApiKey, api_key: true,
        [Param::query("server"), Param::query_opt("character_id")]
    ),
    operation!("ankama.game.endSessionWithApiKey", Post GameEndSessionWithApiKey, api_key: true, [
        Param::query("session_id"),
    ]),
    // ----- Shield -----
    operation!("ankama.shield.securityCode", Get ShieldSecurityCode, api_key: true, [
        Param::query_opt("transport_type"),
    ]),
    operation!("ankama.shield.validateCode", Get ShieldValidateCode, api_key: true, [
        Param::query("game_id"),
        Param::query("code"),
        Param::query_opt("name"),
    ]),
    // ----- Misc -----
    operation!("ankama.legals.tou", Get LegalsTou, api_key: false, [
        Param::query("lang"),
        Param::query_opt("game"),
    ]),
    operation!("ankama.money.ogrinesAmount", Get MoneyOgrinesAmount, api_key: true, []),
];
