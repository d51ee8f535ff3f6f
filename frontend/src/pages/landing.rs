use log::error;
use yew::prelude::*;

use crate::effects::Effects;

const TABS: [(&str, &str); 3] = [("home", "Home"), ("stats", "Live Stats"), ("pricing", "Pricing")];

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "👻",
        "Ghost Projections",
        "Projections that update as injury reports, weather and line moves come in.",
    ),
    (
        "📈",
        "Matchup Heatmaps",
        "See which defenses leak points to which positions before you set a lineup.",
    ),
    (
        "⚡",
        "Waiver Radar",
        "Breakout candidates flagged days before they show up on everyone's wire.",
    ),
];

const PLAYERS: [(&str, &str, &str); 5] = [
    ("J. Allen", "QB", "24.6"),
    ("C. McCaffrey", "RB", "21.3"),
    ("T. Hill", "WR", "18.4"),
    ("T. Kelce", "TE", "14.9"),
    ("J. Tucker", "K", "9.2"),
];

const PLANS: [(&str, &str, &[&str]); 3] = [
    ("Rookie", "$0", &["Weekly projections", "One league"]),
    ("Pro", "$9", &["Live projections", "Five leagues", "Waiver radar"]),
    (
        "Dynasty",
        "$19",
        &["Everything in Pro", "Unlimited leagues", "Trade analyzer"],
    ),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    // The markup is static, so behaviors attach once after the first render.
    use_effect_with_deps(
        move |_| {
            let effects = match Effects::mount() {
                Ok(effects) => Some(effects),
                Err(e) => {
                    error!("Failed to install page effects: {}", e);
                    None
                }
            };
            move || drop(effects)
        },
        (),
    );

    html! {
        <div class="landing-page">
            <div class="cursor-glow" id="cursorGlow"></div>

            <header class="site-header">
                <a href="#" class="logo">{"PHANTOM"}</a>
                <button class="menu-btn" id="menuBtn" aria-label="Menu">
                    <span></span>
                    <span></span>
                </button>
            </header>

            <nav class="mobile-menu" id="mobileMenu">
                {
                    for TABS.iter().map(|(id, label)| html! {
                        <button class="mobile-tab mobile-link" data-tab={*id}>{*label}</button>
                    })
                }
                <a href="#features" class="mobile-link">{"Features"}</a>
            </nav>

            <section class="hero" data-tab="home">
                <div class="hero-copy">
                    <h1>{"Fantasy analytics that see what others miss"}</h1>
                    <p>{"Projections, matchups and waiver intel in one haunted dashboard."}</p>
                    <a href="#features" class="hero-cta">{"See how it works"}</a>
                </div>
                <div class="hero-visual">
                    <div class="stat-card">
                        <span class="stat-value" data-count="94">{"0"}</span>
                        <span class="stat-label">{"% lineup accuracy"}</span>
                    </div>
                    <div class="stat-card">
                        <span class="stat-value" data-count="250">{"0"}</span>
                        <span class="stat-label">{"K projections a week"}</span>
                    </div>
                    <div class="stat-card">
                        <span class="stat-value" data-count="12">{"0"}</span>
                        <span class="stat-label">{"data sources"}</span>
                    </div>
                </div>
            </section>

            <nav class="main-tabs" id="mainTabs">
                {
                    for TABS.iter().map(|(id, label)| html! {
                        <button class="main-tab" data-tab={*id}>{*label}</button>
                    })
                }
            </nav>

            <section class="features" id="features" data-tab="home">
                <div class="section-header">
                    <h2>{"Built for league winners"}</h2>
                </div>
                <div class="feature-grid">
                    {
                        for FEATURES.iter().map(|(icon, title, body)| html! {
                            <div class="feature-card">
                                <span class="feature-icon">{*icon}</span>
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </div>
                        })
                    }
                </div>
            </section>

            <section class="stats" data-tab="stats">
                <div class="section-header">
                    <h2>{"Live projections"}</h2>
                    <span class="update-time">{"Updated 1s ago"}</span>
                </div>
                <div class="stats-dashboard">
                    <div class="player-row header">
                        <span>{"Player"}</span>
                        <span>{"Pos"}</span>
                        <span class="proj">{"Proj"}</span>
                    </div>
                    {
                        for PLAYERS.iter().map(|(name, position, projection)| html! {
                            <div class="player-row">
                                <span class="name">{*name}</span>
                                <span class="pos">{*position}</span>
                                <span class="proj">{*projection}</span>
                            </div>
                        })
                    }
                </div>
                <div class="accuracy-showcase">
                    <span class="accuracy-value" data-count="87">{"0"}</span>
                    <span>{"% of top-12 finishes called in week one"}</span>
                </div>
            </section>

            <section class="pricing" id="pricing" data-tab="pricing">
                <div class="section-header">
                    <h2>{"Pick your edge"}</h2>
                </div>
                <div class="pricing-grid">
                    {
                        for PLANS.iter().map(|(name, price, perks)| html! {
                            <div class="pricing-card">
                                <h3>{*name}</h3>
                                <p class="price">{*price}<span>{"/mo"}</span></p>
                                <ul>
                                    { for perks.iter().map(|perk| html! { <li>{*perk}</li> }) }
                                </ul>
                                <a href="#pricing" class="pricing-cta">{"Choose"}</a>
                            </div>
                        })
                    }
                </div>
            </section>
        </div>
    }
}
