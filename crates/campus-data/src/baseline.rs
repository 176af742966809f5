//! Built-in mock data. Dates are laid out relative to `today` so the
//! dashboard always looks current.

use crate::types::*;
use chrono::{Datelike, Days, NaiveDate, Weekday};

pub(crate) const MONTHLY_BUDGET: f64 = 2000.0;

fn course(weekday: Weekday, time: &str, name: &str, location: &str, teacher: &str, kind: &str) -> Course {
    Course {
        weekday,
        time: time.into(),
        course: name.into(),
        location: location.into(),
        teacher: teacher.into(),
        kind: kind.into(),
    }
}

fn shift(today: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        today.checked_add_days(Days::new(days as u64)).unwrap_or(today)
    } else {
        today.checked_sub_days(Days::new(days.unsigned_abs())).unwrap_or(today)
    }
}

pub(crate) fn week_schedule() -> Vec<Course> {
    vec![
        course(Weekday::Mon, "08:30-10:05", "Advanced Mathematics II", "Teaching Building A-301", "Prof. Wang", "Lecture"),
        course(Weekday::Mon, "14:00-15:35", "University Physics", "Lab Building B-205", "Prof. Li", "Lecture"),
        course(Weekday::Tue, "10:15-11:50", "Python Programming", "Computer Building C-102", "Prof. Zhang", "Lab"),
        course(Weekday::Wed, "08:30-10:05", "Linear Algebra", "Teaching Building A-405", "Prof. Chen", "Lecture"),
        course(Weekday::Wed, "14:00-15:35", "English Listening & Speaking", "Language Building D-201", "Emily", "Seminar"),
        course(Weekday::Thu, "10:15-11:50", "Data Structures", "Computer Building C-301", "Prof. Liu", "Lecture"),
        course(Weekday::Fri, "08:30-10:05", "Political Theory", "Teaching Building A-101", "Prof. Zhao", "Lecture"),
    ]
}

/// Month-to-date totals per category before any user-recorded expense.
pub(crate) fn category_totals() -> Vec<(Category, f64)> {
    vec![
        (Category::Food, 820.0),
        (Category::Transport, 150.0),
        (Category::Shopping, 380.0),
        (Category::StudySupplies, 120.0),
        (Category::Entertainment, 100.0),
        (Category::Other, 80.0),
    ]
}

pub(crate) fn recent_transactions(today: NaiveDate) -> Vec<Transaction> {
    let tx = |days_ago: i64, item: &str, amount: f64, category: Category| Transaction {
        date: shift(today, -days_ago),
        item: item.into(),
        amount,
        category,
    };
    vec![
        tx(0, "Canteen lunch", 15.0, Category::Food),
        tx(1, "Bubble tea", 18.0, Category::Food),
        tx(1, "Metro card top-up", 50.0, Category::Transport),
        tx(2, "Textbook: Data Structures", 45.0, Category::StudySupplies),
        tx(3, "Movie ticket", 39.9, Category::Entertainment),
    ]
}

pub(crate) fn health(today: NaiveDate) -> HealthSnapshot {
    HealthSnapshot {
        today_steps: 4523,
        step_goal: 8000,
        sleep_hours: 6.5,
        sleep_quality: "Fair".into(),
        water_cups: 4,
        water_goal: 8,
        exercise_this_week: 1,
        exercise_goal: 3,
        last_exercise: shift(today, -4),
        mood: "😐 Okay".into(),
        checkin_streak: 5,
        bmi: 21.3,
        weight_kg: 62.0,
    }
}

pub(crate) fn todos(today: NaiveDate) -> Vec<Todo> {
    let todo = |id: u32, task: &str, due_in: i64, priority: Priority, done: bool| Todo {
        id,
        task: task.into(),
        deadline: shift(today, due_in),
        priority,
        done,
    };
    vec![
        todo(1, "Submit calculus homework", 1, Priority::Urgent, false),
        todo(2, "Review for the linear algebra midterm", 7, Priority::Important, false),
        todo(3, "Python lab report", 3, Priority::Important, false),
        todo(4, "Return library books", 2, Priority::Normal, false),
        todo(5, "Club meeting", 1, Priority::Normal, true),
    ]
}

pub(crate) fn exams(today: NaiveDate) -> Vec<Exam> {
    let exam = |course: &str, kind: &str, in_days: i64, location: &str| Exam {
        course: course.into(),
        kind: kind.into(),
        date: shift(today, in_days),
        days_left: in_days,
        location: location.into(),
    };
    vec![
        exam("Linear Algebra", "Midterm", 7, "Teaching Building A-101"),
        exam("Advanced Mathematics II", "Final", 14, "Teaching Building A-301"),
    ]
}

pub(crate) fn travel_plan(today: NaiveDate) -> TravelPlan {
    // Next Saturday, or a week out when today already is one.
    let until_saturday = (Weekday::Sat.num_days_from_monday() as i64
        - today.weekday().num_days_from_monday() as i64)
        .rem_euclid(7);
    let date = shift(today, if until_saturday == 0 { 7 } else { until_saturday });

    let stop = |time: &str, activity: &str, location: &str, cost: f64| TravelStop {
        time: time.into(),
        activity: activity.into(),
        location: location.into(),
        cost,
    };
    let itinerary = vec![
        stop("07:40", "High-speed train to Hangzhou", "Hangzhou East Station", 75.0),
        stop("10:00", "Walk around West Lake", "West Lake", 0.0),
        stop("12:30", "Lunch", "Louwailou Restaurant", 120.0),
        stop("14:30", "Visit Lingyin Temple", "Lingyin Temple", 75.0),
        stop("18:30", "Train back to campus", "Hangzhou East Station", 75.0),
    ];
    let total_estimated_cost = itinerary.iter().map(|s| s.cost).sum();

    TravelPlan {
        trip_name: "Weekend trip to West Lake".into(),
        date,
        budget: 500.0,
        total_estimated_cost,
        companions: vec!["Ming".into(), "Hong".into()],
        itinerary,
        packing_list: ["Student ID", "Power bank", "Umbrella", "Water bottle", "Sunscreen"]
            .into_iter()
            .map(|item| PackingItem {
                item: item.into(),
                packed: false,
            })
            .collect(),
    }
}

/// Number of days in the month containing `date`.
pub(crate) fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}
