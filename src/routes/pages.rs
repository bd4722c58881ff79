use crate::{
    maud_conveniences::{form_element, stat_card, subtitle, title},
    state::RosterState,
};
use axum::{extract::State, http::header, response::IntoResponse};
use maud::{Markup, html};

const PAGE_SCRIPT: &str = include_str!("../../static/script.js");

pub async fn get_index_route(State(state): State<RosterState>) -> Markup {
    state.render("Students", "students", html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-5xl w-full flex flex-col space-y-4" {
            div class="flex flex-row justify-between items-center" {
                (title("Students"))
                button id="open-add-modal" class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" {
                    "Add Student"
                }
            }
            input id="search-input" type="search" placeholder="Search by name, email or major" class="shadow border rounded w-full py-2 px-3 bg-gray-700 border-gray-600" {}
            table class="min-w-full bg-gray-800 rounded shadow-md" {
                thead class="bg-gray-700" {
                    tr {
                        @for heading in ["ID", "Name", "Email", "Major", ""] {
                            th class="py-2 px-4 text-left font-semibold text-gray-300" {(heading)}
                        }
                    }
                }
                tbody id="student-list" {}
            }
            p id="empty-state" class="italic text-gray-400 hidden" {"No students yet."}
        }
        div id="modal-overlay" class="fixed inset-0 bg-black/60 hidden items-center justify-center" {
            form id="student-form" class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
                h2 id="modal-title" class="text-xl font-semibold mb-4" {"Add Student"}
                input type="hidden" id="student-id" {}
                (form_element("first_name", "First Name", "text", true))
                (form_element("last_name", "Last Name", "text", true))
                (form_element("email", "Email Address", "email", true))
                (form_element("major", "Major (optional)", "text", false))
                div class="flex items-center justify-between" {
                    button type="submit" id="submit-button" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded" {
                        "Save"
                    }
                    button type="button" data-close-modal="true" class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {
                        "Cancel"
                    }
                }
            }
        }
    })
}

pub async fn get_dashboard(State(state): State<RosterState>) -> Markup {
    state.render("Dashboard", "dashboard", html! {
        div class="max-w-5xl w-full flex flex-col space-y-8" {
            (title("Dashboard"))
            div class="grid grid-cols-1 sm:grid-cols-2 gap-4" {
                (stat_card("total-students", "Students"))
                (stat_card("total-majors", "Majors"))
            }
            div class="bg-gray-800 p-8 rounded shadow-md" {
                (subtitle("Recently Added"))
                ul id="recent-students-list" class="divide-y divide-gray-700" {}
            }
        }
    })
}

pub async fn get_settings(State(state): State<RosterState>) -> Markup {
    state.render("Settings", "settings", html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
            (title("Settings"))
            label for="dark-mode-toggle" class="flex flex-row items-center justify-between" {
                span {"Dark mode"}
                input type="checkbox" id="dark-mode-toggle" {}
            }
        }
    })
}

pub async fn get_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        PAGE_SCRIPT,
    )
}
