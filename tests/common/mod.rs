//! Shared descriptors for integration tests.

#![allow(dead_code, unused_imports)]

use actiondesc::{create_action, create_simple_action, ActionDesc, SimpleActionDesc};
use serde::{Deserialize, Serialize};

pub fn add() -> ActionDesc<i64, i64> {
    create_action("ADD", |prev: i64, n: i64| prev + n)
}

pub fn inc() -> SimpleActionDesc<i64> {
    create_simple_action("INC", |prev: i64| prev + 1)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Todos {
    pub items: Vec<Todo>,
    pub next_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    pub title: String,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
}

pub fn add_todo() -> ActionDesc<Todos, NewTodo> {
    create_action("todos/add", |mut prev: Todos, new: NewTodo| {
        prev.items.push(Todo {
            id: prev.next_id,
            title: new.title,
            done: false,
        });
        prev.next_id += 1;
        prev
    })
}

pub fn toggle_todo() -> ActionDesc<Todos, u32> {
    create_action("todos/toggle", |mut prev: Todos, id: u32| {
        if let Some(todo) = prev.items.iter_mut().find(|todo| todo.id == id) {
            todo.done = !todo.done;
        }
        prev
    })
}

pub fn clear_done() -> SimpleActionDesc<Todos> {
    create_simple_action("todos/clear_done", |mut prev: Todos| {
        prev.items.retain(|todo| !todo.done);
        prev
    })
}
