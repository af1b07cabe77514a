mod health_check;
mod helper;
mod newsletter;
mod open_call;
mod order;
