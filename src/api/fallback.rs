use crate::documents::Game;

/// Bundled catalog served when the endpoint is unconfigured or unreachable.
/// Order matters: callers render the list exactly as given here.
pub fn fallback_games() -> Vec<Game> {
    vec![
        game(
            1,
            "miras-homeownership",
            "https://miras-homeownership.wgab.world/home",
            "https://miras-homeownership.wgab.world/admin",
            "Schoolsharks@2025",
        ),
        game(
            2,
            "skill-quest",
            "https://skillquest.wgab.world/",
            "https://skillquest.wgab.world/admin",
            "Schoolsharks@2025",
        ),
        // No admin surface for this one.
        game(
            3,
            "sniff-and-tail-server",
            "https://sniffandtail.wgab.world",
            "",
            "Schoolsharks@202",
        ),
        game(
            4,
            "zero-to-hero",
            "https://zerotohero.wgab.world/",
            "https://zerotohero.wgab.world/admin",
            "Schoolsharks@2025",
        ),
        game(
            5,
            "miras-choices",
            "https://miraschoices.wgab.world/",
            "https://miraschoices.wgab.world/admin",
            "Schoolsharks@20254",
        ),
        game(
            6,
            "game-of-choises",
            "https://gameofchoises.wgab.world/",
            "https://gameofchoises.wgab.world/admin",
            "Schoolsharks@2025",
        ),
        game(
            7,
            "data-guard",
            "https://dataguard.wgab.world/",
            "https://dataguard.wgab.world/admin",
            "Schoolsharks@2025",
        ),
        game(
            8,
            "balance-master",
            "https://balancemaster.wgab.world/",
            "https://balancemaster.wgab.world/admin",
            "Schoolsharks@2025",
        ),
        game(
            9,
            "aspire-for-her",
            "https://sheexports.afh.wgab.world/",
            "https://sheexports.afh.wgab.world/admin",
            "Schoolsharks@2025",
        ),
        game(
            10,
            "word-puzzle",
            "https://wordpuzzle.wgab.world/",
            "",
            "Schoolsharks@2025",
        ),
        game(
            11,
            "sherry-chat-game",
            "https://chatgame.wgab.world",
            "https://chatgame.wgab.world/admin",
            "Schoolsharks@2025",
        ),
        game(
            12,
            "aspire-for-her-staging",
            "https://staging-sheexports.afh.wgab.world/",
            "https://staging-sheexports.afh.wgab.world/admin",
            "Schoolsharks@2025",
        ),
        game(
            13,
            "mindsmith",
            "https://mindsmith.wgab.world/user/onboarding/",
            "https://mindsmith.wgab.world/user/onboarding/admin",
            "Schoolsharks@2025",
        ),
        game(
            14,
            "quickk",
            "https://staging-quickk.wgab.world/",
            "https://staging-quickk.wgab.world/admin",
            "Schoolsharks@2025",
        ),
        game(
            15,
            "upsc-gurus",
            "https://app.upscgurus.in",
            "https://app.upscgurus.in/admin",
            "Schoolsharks@2025",
        ),
    ]
}

fn game(id: i64, name: &str, player_link: &str, admin_link: &str, admin_passcode: &str) -> Game {
    Game {
        id,
        name: name.to_owned(),
        player_link: player_link.to_owned(),
        admin_link: admin_link.to_owned(),
        admin_pin: FALLBACK_PIN.to_owned(),
        admin_passcode: admin_passcode.to_owned(),
    }
}

const FALLBACK_PIN: &str = "1111";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_set_is_non_empty_and_ordered() {
        let games = fallback_games();
        assert!(!games.is_empty());

        let ids = games.iter().map(|game| game.id).collect::<Vec<_>>();
        assert_eq!(ids, (1..=games.len() as i64).collect::<Vec<_>>());
    }

    #[test]
    fn fallback_set_is_already_normalized() {
        for game in fallback_games() {
            assert!(!game.name.trim().is_empty());
            assert_eq!(game.admin_link, game.admin_link.trim());
        }
    }
}
