//! Fixed table of HAAPI endpoints: logical key -> path relative to the base URL.

use std::fmt;
use std::str::FromStr;

/// Generate the `Endpoint` enum together with its key and path tables.
macro_rules! endpoints {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $key:literal, $path:literal;
        )+
    ) => {
        /// Logical HAAPI endpoint.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Endpoint {
            $( $(#[$meta])* $variant, )+
        }

        impl Endpoint {
            /// Every endpoint, in declaration order.
            pub const ALL: &'static [Endpoint] = &[ $( Endpoint::$variant, )+ ];

            /// The logical key, e.g. `"ANKAMA_ACCOUNT_STATUS"`.
            #[must_use]
            pub const fn key(self) -> &'static str {
                match self {
                    $( Endpoint::$variant => $key, )+
                }
            }

            /// Path relative to the configured base URL.
            #[must_use]
            pub const fn path(self) -> &'static str {
                match self {
                    $( Endpoint::$variant => $path, )+
                }
            }
        }
    };
}

endpoints! {
    AccountStatus => "ANKAMA_ACCOUNT_STATUS", "json/Ankama/v2/Account/Status";
    AccountAccount => "ANKAMA_ACCOUNT_ACCOUNT", "json/Ankama/v5/Account/Account";
    AccountCreateToken => "ANKAMA_ACCOUNT_CREATE_TOKEN", "json/Ankama/v5/Account/CreateToken";
    AccountSignOnWithApiKey =>
        "ANKAMA_ACCOUNT_SIGN_ON_WITH_API_KEY", "json/Ankama/v5/Account/SignOnWithApiKey";
    AccountSetNickname =>
        "ANKAMA_ACCOUNT_SET_NICKNAME", "json/Ankama/v5/Account/SetNicknameWithApiKey";
    AccountSendMailValidation =>
        "ANKAMA_ACCOUNT_SEND_MAIL_VALIDATION", "json/Ankama/v5/Account/SendMailValidation";
    ApiCreateApiKey => "ANKAMA_API_CREATE_API_KEY", "json/Ankama/v5/Api/CreateApiKey";
    ApiRefreshApiKey => "ANKAMA_API_REFRESH_API_KEY", "json/Ankama/v5/Api/RefreshApiKey";
    ApiDeleteApiKey => "ANKAMA_API_DELETE_API_KEY", "json/Ankama/v5/Api/DeleteApiKey";
    GameStartSessionWithApiKey =>
        "ANKAMA_GAME_START_SESSION_WITH_API_KEY", "json/Ankama/v5/Game/StartSessionWithApiKey";
    GameEndSessionWithApiKey =>
        "ANKAMA_GAME_END_SESSION_WITH_API_KEY", "json/Ankama/v5/Game/EndSessionWithApiKey";
    ShieldSecurityCode => "ANKAMA_SHIELD_SECURITY_CODE", "json/Ankama/v5/Shield/SecurityCode";
    ShieldValidateCode => "ANKAMA_SHIELD_VALIDATE_CODE", "json/Ankama/v5/Shield/ValidateCode";
    LegalsTou => "ANKAMA_LEGALS_TOU", "json/Ankama/v5/Legals/Tou";
    /// The backend path really is spelled `OgrinsAmount`.
    MoneyOgrinesAmount => "ANKAMA_MONEY_OGRINES_AMOUNT", "json/Ankama/v5/Money/OgrinsAmount";
}

impl Endpoint {
    /// Looks up an endpoint by its logical key. Exact, case-sensitive match.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|endpoint| endpoint.key() == key)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The key is not in the endpoint table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown endpoint key: {0}")]
pub struct UnknownEndpoint(pub String);

impl FromStr for Endpoint {
    type Err = UnknownEndpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::from_key(s).ok_or_else(|| UnknownEndpoint(s.to_string()))
    }
}
