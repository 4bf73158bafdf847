use crate::error::FinanceError;
use crate::models::debt::Debt;
use crate::models::insight::{Insight, InsightKind};
use crate::operations::budget::{bar_fill_percent, budget_bars, percent_of, usage_band, UsageBand};
use crate::operations::debt::{avalanche_savings, monthly_interest};
use crate::operations::metrics::{category_share, round_to, Aggregates, CategorySlice};
use crate::session::Session;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Modifier, Rect, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use ratatui::widgets::canvas::{Canvas, Points};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::io;

pub struct DashboardData {
    aggregates: Aggregates,
    insights: Vec<Insight>,
    slices: Vec<CategorySlice>,
    budgets: Vec<BudgetRow>,
    debts: Vec<DebtRow>,
    avalanche_savings: Decimal,
}

struct BudgetRow {
    category: String,
    spent: Decimal,
    limit: Decimal,
    percentage: Option<Decimal>,
}

struct DebtRow {
    name: String,
    balance: Decimal,
    interest_rate: Decimal,
    minimum_payment: Decimal,
    monthly_interest: Decimal,
    due: String,
}

pub fn run_dashboard(session: &Session) -> Result<(), FinanceError> {
    let data = build_dashboard(session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = (|| -> Result<(), FinanceError> {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        loop {
            terminal.draw(|frame| draw_dashboard(frame, &data))?;

            if event::poll(std::time::Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.code == KeyCode::Char('q') => break,
                    Event::Key(key) if key.code == KeyCode::Esc => break,
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

pub fn build_dashboard(session: &Session) -> DashboardData {
    let aggregates = session.aggregates();
    let slices = category_share(&aggregates);

    let budgets = budget_bars(session.budgets())
        .into_iter()
        .map(|bar| BudgetRow {
            percentage: percent_of(bar.spent, bar.limit),
            category: bar.category,
            spent: bar.spent,
            limit: bar.limit,
        })
        .collect();

    let debts = session.debts().iter().map(debt_row).collect();

    DashboardData {
        aggregates,
        insights: session.insights().to_vec(),
        slices,
        budgets,
        debts,
        avalanche_savings: avalanche_savings(session.debts()),
    }
}

fn debt_row(debt: &Debt) -> DebtRow {
    DebtRow {
        name: debt.name.clone(),
        balance: debt.balance,
        interest_rate: debt.interest_rate.normalize(),
        minimum_payment: debt.minimum_payment,
        monthly_interest: monthly_interest(debt),
        due: debt.due_date.format("%Y-%m-%d").to_string(),
    }
}

pub fn draw_dashboard(frame: &mut ratatui::Frame, data: &DashboardData) {
    let size = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(30),
            Constraint::Min(8),
        ])
        .split(size);

    render_summary(frame, layout[0], &data.aggregates);
    render_insights(frame, layout[1], &data.insights);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(layout[2]);

    let share = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(bottom[0]);

    render_pie_chart(frame, share[0], &data.slices);
    render_category_table(frame, share[1], &data.slices);
    render_budgets(frame, bottom[1], &data.budgets);
    render_debts(frame, bottom[2], data);
}

pub fn money(value: Decimal) -> String {
    format!("${:.2}", round_to(value, 2))
}

fn category_color(idx: usize) -> Color {
    let palette = [
        Color::Cyan,
        Color::Magenta,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Red,
        Color::LightCyan,
        Color::LightMagenta,
        Color::LightYellow,
        Color::LightGreen,
        Color::LightBlue,
    ];
    palette[idx % palette.len()]
}

fn insight_color(kind: InsightKind) -> Color {
    match kind {
        InsightKind::Positive => Color::Green,
        InsightKind::Warning => Color::Yellow,
        InsightKind::Alert => Color::Red,
        InsightKind::Info => Color::Cyan,
    }
}

fn band_color(band: UsageBand) -> Color {
    match band {
        UsageBand::Nominal => Color::Green,
        UsageBand::Warning => Color::Yellow,
        UsageBand::Critical => Color::Red,
    }
}

fn render_summary(frame: &mut ratatui::Frame, area: Rect, aggregates: &Aggregates) {
    let block = Block::default()
        .title("Overview  (press q to exit)")
        .borders(Borders::ALL);

    let net_color = if aggregates.net_income < Decimal::ZERO {
        Color::Red
    } else {
        Color::Green
    };

    let line = Line::from(vec![
        Span::raw("Income "),
        Span::styled(money(aggregates.total_income), Style::default().fg(Color::Green)),
        Span::raw("   Expenses "),
        Span::styled(money(aggregates.total_expenses), Style::default().fg(Color::Red)),
        Span::raw("   Net "),
        Span::styled(money(aggregates.net_income), Style::default().fg(net_color)),
        Span::raw("   Debt "),
        Span::styled(money(aggregates.total_debt), Style::default().fg(Color::Magenta)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_insights(frame: &mut ratatui::Frame, area: Rect, insights: &[Insight]) {
    let block = Block::default().title("Insights").borders(Borders::ALL);

    let lines: Vec<Line> = insights
        .iter()
        .map(|insight| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", insight.title),
                    Style::default()
                        .fg(insight_color(insight.kind))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(insight.message.clone()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_pie_chart(frame: &mut ratatui::Frame, area: Rect, slices: &[CategorySlice]) {
    let block = Block::default().title("Expenses by Category").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if slices.is_empty() {
        let empty = Paragraph::new("No expenses recorded").alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let total = slices
        .iter()
        .fold(Decimal::ZERO, |acc, slice| acc + slice.value)
        .to_f64()
        .unwrap_or(1.0);

    let mut arcs = Vec::new();
    let mut start_angle = 0.0_f64;
    for (idx, slice) in slices.iter().enumerate() {
        let ratio = slice.value.to_f64().unwrap_or(0.0) / total;
        let sweep = ratio * std::f64::consts::TAU;
        arcs.push((start_angle, start_angle + sweep, category_color(idx)));
        start_angle += sweep;
    }

    let canvas = Canvas::default()
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (start, end, color) in &arcs {
                let mut points = Vec::new();
                let mut r = 0.0;
                while r <= 1.0 {
                    let mut angle = *start;
                    while angle <= *end {
                        points.push((r * angle.cos(), r * angle.sin()));
                        angle += 0.05;
                    }
                    r += 0.04;
                }
                if !points.is_empty() {
                    ctx.draw(&Points { coords: &points, color: *color });
                }
            }
        });

    frame.render_widget(canvas, inner);
}

fn render_category_table(frame: &mut ratatui::Frame, area: Rect, slices: &[CategorySlice]) {
    let block = Block::default().title("Category Spend").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if slices.is_empty() {
        return;
    }

    let lines: Vec<Line> = slices
        .iter()
        .enumerate()
        .map(|(idx, slice)| {
            let style = Style::default().fg(category_color(idx));
            Line::from(vec![
                Span::styled(format!("{:15}", slice.name), style),
                Span::styled(format!("{:>12}", money(slice.value)), style),
                Span::styled(format!("{:>5}%", slice.percent), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_budgets(frame: &mut ratatui::Frame, area: Rect, budgets: &[BudgetRow]) {
    let block = Block::default().title("Budgets").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if budgets.is_empty() {
        let empty = Paragraph::new("No budgets set").alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let bar_width = inner.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    for budget in budgets {
        let color = band_color(usage_band(budget.percentage));
        let label = match budget.percentage {
            Some(p) => format!("{}%", p),
            None => "n/a".to_string(),
        };

        lines.push(Line::from(vec![
            Span::styled(
                budget.category.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(label, Style::default().fg(color)),
        ]));

        let fill = bar_fill_percent(budget.percentage).to_f64().unwrap_or(0.0);
        let filled = ((fill / 100.0) * bar_width as f64).round() as usize;
        lines.push(Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(color)),
            Span::styled(
                "░".repeat(bar_width.saturating_sub(filled)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        lines.push(Line::from(format!(
            "Spent {} of {}",
            money(budget.spent),
            money(budget.limit)
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_debts(frame: &mut ratatui::Frame, area: Rect, data: &DashboardData) {
    let block = Block::default().title("Debts").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for debt in &data.debts {
        lines.push(Line::from(Span::styled(
            debt.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(
            "{} at {}% APR, due {}",
            money(debt.balance),
            debt.interest_rate,
            debt.due
        )));
        lines.push(Line::from(format!(
            "Min {} / interest {} per month",
            money(debt.minimum_payment),
            money(debt.monthly_interest)
        )));
    }

    if !data.debts.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Recommended: Use Avalanche method to save ${} in interest over time.",
                data.avalanche_savings
            ),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from("Avalanche: highest interest first"));
        lines.push(Line::from("Snowball: smallest balance first"));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_string(session: &Session, width: u16, height: u16) -> String {
        let data = build_dashboard(session);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw_dashboard(frame, &data)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(Decimal::from(3870)), "$3870.00");
        assert_eq!(money(Decimal::new(12345, 3)), "$12.35");
        assert_eq!(money(Decimal::from(-150)), "$-150.00");
    }

    #[test]
    fn test_build_dashboard_from_sample_data() {
        let session = Session::with_sample_data();
        let data = build_dashboard(&session);

        assert_eq!(data.slices.len(), 4);
        assert_eq!(data.budgets.len(), 4);
        assert_eq!(data.budgets[1].category, "Entertainment");
        assert_eq!(data.budgets[1].percentage, Some(Decimal::from(67)));
        assert_eq!(data.debts[0].monthly_interest, Decimal::new(3854, 2));
        assert_eq!(data.avalanche_savings, Decimal::from(487));
        assert_eq!(data.insights.len(), 3);
    }

    #[test]
    fn test_dashboard_renders_sample_session() {
        let session = Session::with_sample_data();
        let screen = render_to_string(&session, 160, 60);

        assert!(screen.contains("Savings Rate"));
        assert!(screen.contains("Spending Forecast"));
        assert!(screen.contains("$3870.00"));
        assert!(screen.contains("Entertainment"));
        assert!(screen.contains("Credit Card"));
        assert!(screen.contains("Avalanche"));
    }

    #[test]
    fn test_dashboard_renders_empty_session() {
        let session = Session::new();
        let screen = render_to_string(&session, 120, 40);

        assert!(screen.contains("No expenses recorded"));
        assert!(screen.contains("No budgets set"));
        assert!(!screen.contains("Avalanche"));
    }
}
