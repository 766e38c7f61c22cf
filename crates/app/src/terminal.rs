use std::error::Error;

use services::{AppServices, SessionSnapshot};
use sprint_core::model::{ACHIEVEMENTS, GameMode, QuestionId, SessionResults, Topic, format_clock};
use sprint_core::study::{StudyTab, StudyZone};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

fn stdin_lines() -> Input {
    BufReader::new(tokio::io::stdin()).lines()
}

// ─── PLAY ───────────────────────────────────────────────────────────────────

/// Runs one session on the terminal until it finishes or the player quits.
///
/// Typed lines are answers; `:hint`, `:end` and `:quit` are commands.
pub async fn play(
    services: &AppServices,
    mode: GameMode,
    topic: Topic,
) -> Result<(), Box<dyn Error>> {
    let engine = services.engine();
    let mut snapshots = engine.watch();
    let mut input = stdin_lines();
    let mut shown: Option<QuestionId> = None;

    engine.start(mode, topic);
    println!("{} · {}", mode.title(), topic.title());
    println!("{}", mode.description());

    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        if snapshot.is_finished() {
            if let Some(results) = engine.results() {
                print_results(&results, &snapshot);
            }
            break;
        }
        if let Some(question) = &snapshot.question {
            if shown != Some(question.id()) {
                shown = Some(question.id());
                print_status(&snapshot);
                println!("  {}", question.prompt_text());
            }
        }

        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else {
                    engine.end();
                    if engine.snapshot().is_finished() {
                        continue;
                    }
                    break;
                };
                match line.trim() {
                    "" => {}
                    ":quit" | ":q" => {
                        engine.return_to_menu();
                        break;
                    }
                    ":end" => engine.end(),
                    ":hint" => match snapshot.question.as_ref().and_then(|q| q.hint_text()) {
                        Some(hint) => println!("  hint: {hint}"),
                        None => println!("  no hint for this one"),
                    },
                    answer => {
                        if let Some(feedback) = engine.submit(answer).await {
                            println!("  {}", feedback.message);
                            for achievement in &feedback.unlocked {
                                println!("  {} unlocked: {}", achievement.icon, achievement.title);
                            }
                        } else if snapshot.is_active() {
                            println!("  already answered; next question coming up");
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_status(snapshot: &SessionSnapshot) {
    let mut status = format!(
        "[score {} · streak {} · lvl {} ({}/100 xp)",
        snapshot.score, snapshot.streak, snapshot.level, snapshot.level_progress
    );
    if snapshot.mode.is_timed() {
        status.push_str(&format!(" · {}", format_clock(snapshot.time_remaining_seconds)));
    }
    if snapshot.mode == GameMode::Climb {
        status.push_str(&format!(" · climb {}%", snapshot.climb_progress));
    }
    status.push(']');
    println!();
    println!("{status}");
}

fn print_results(results: &SessionResults, snapshot: &SessionSnapshot) {
    println!();
    println!("Session complete: {} · {}", results.mode.title(), results.topic.title());
    println!("  score        {}", results.score);
    println!("  answered     {}", results.total_answered);
    println!("  correct      {}", results.correct_answered);
    println!("  accuracy     {}%", results.accuracy);
    println!("  best streak  {}", results.best_streak);
    println!("  level        {} ({} xp)", snapshot.level, snapshot.experience_points);
}

// ─── STUDY ──────────────────────────────────────────────────────────────────

/// Interactive flashcard and trick browser.
pub async fn study(services: &AppServices) -> Result<(), Box<dyn Error>> {
    let clock = services.clock();
    let mut zone = StudyZone::default();
    let mut input = stdin_lines();

    println!("Study Zone: [f]lip, [n]ext, [p]rev, [y]/[x] got it / missed it, [t]ricks, [c]ards, [q]uit");
    render_study(&zone);

    while let Some(line) = input.next_line().await? {
        match line.trim() {
            "q" | "quit" => break,
            "f" | "" => zone.flip(),
            "n" => match zone.tab() {
                StudyTab::Flashcards => zone.next_card(),
                StudyTab::Tricks => zone.next_trick(),
            },
            "p" => match zone.tab() {
                StudyTab::Flashcards => zone.prev_card(),
                StudyTab::Tricks => zone.prev_trick(),
            },
            "y" => {
                zone.record_answer(true, clock.now());
                zone.next_card();
            }
            "x" => {
                zone.record_answer(false, clock.now());
                zone.next_card();
            }
            "t" => zone.select_tab(StudyTab::Tricks),
            "c" => zone.select_tab(StudyTab::Flashcards),
            other => {
                println!("unknown command: {other}");
                continue;
            }
        }
        render_study(&zone);
    }

    let reviewed = zone.cards().iter().filter(|c| c.last_reviewed.is_some()).count();
    tracing::debug!(reviewed, "study zone closed");
    Ok(())
}

fn render_study(zone: &StudyZone) {
    println!();
    match zone.tab() {
        StudyTab::Flashcards => {
            let Some(card) = zone.current_card() else {
                println!("(no flashcards)");
                return;
            };
            println!(
                "card {}/{} · {}",
                zone.card_index() + 1,
                zone.cards().len(),
                card.topic.title()
            );
            if zone.is_flipped() {
                println!("  {} = {}", card.question, card.answer);
            } else {
                println!("  {} = ?", card.question);
            }
        }
        StudyTab::Tricks => {
            let Some(trick) = zone.current_trick() else {
                println!("(no tricks)");
                return;
            };
            println!("{}", trick.title);
            println!("  {}", trick.description);
            println!("  e.g. {}", trick.example);
            for (n, step) in trick.steps.iter().enumerate() {
                println!("  {}. {step}", n + 1);
            }
        }
    }
}

// ─── STATS ──────────────────────────────────────────────────────────────────

pub async fn stats(services: &AppServices) -> Result<(), Box<dyn Error>> {
    let progress = services.progress().load().await;

    println!(
        "Level {} · {} xp ({}/100 to next level)",
        progress.level(),
        progress.experience_points(),
        progress.level_progress()
    );
    println!();
    println!("Achievements:");
    for def in &ACHIEVEMENTS {
        let unlocked = progress
            .achievements()
            .iter()
            .find(|a| a.id == def.id && a.unlocked);
        match unlocked {
            Some(a) => match a.unlocked_at {
                Some(at) => println!(
                    "  {} {} (unlocked {})",
                    def.icon,
                    def.title,
                    at.format("%Y-%m-%d")
                ),
                None => println!("  {} {}", def.icon, def.title),
            },
            None => println!("  ·  {} (locked: {})", def.title, def.description),
        }
    }

    Ok(())
}
