//! Interactive menu loop over the three repositories.
//!
//! # Responsibility
//! - Collect ids and names from the operator and call repository operations.
//! - Render records as text.
//!
//! # Invariants
//! - Repository failures are printed and the menu continues; only I/O errors
//!   end the loop early.
//! - End of input behaves like choosing `Exit`.
//! - Chore assignment asks for the chore first and passes
//!   `(chore_id, roommate_id)` in that order.

use log::warn;
use roommates_core::{
    Chore, ChoreId, ChoreRepository, RepoError, Room, RoomId, RoomRepository, RoommateId,
    RoommateRepository,
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    ShowRooms,
    ShowChores,
    SearchRoom,
    SearchRoommate,
    SearchChore,
    AddRoom,
    AddChore,
    UpdateChore,
    DeleteChore,
    UnassignedChores,
    AssignChore,
    Exit,
}

const MENU: [MenuOption; 12] = [
    MenuOption::ShowRooms,
    MenuOption::ShowChores,
    MenuOption::SearchRoom,
    MenuOption::SearchRoommate,
    MenuOption::SearchChore,
    MenuOption::AddRoom,
    MenuOption::AddChore,
    MenuOption::UpdateChore,
    MenuOption::DeleteChore,
    MenuOption::UnassignedChores,
    MenuOption::AssignChore,
    MenuOption::Exit,
];

impl MenuOption {
    fn label(self) -> &'static str {
        match self {
            Self::ShowRooms => "Show all rooms",
            Self::ShowChores => "Show all chores",
            Self::SearchRoom => "Search for room",
            Self::SearchRoommate => "Search for roommate",
            Self::SearchChore => "Search for chore",
            Self::AddRoom => "Add a room",
            Self::AddChore => "Add a chore",
            Self::UpdateChore => "Update a chore",
            Self::DeleteChore => "Delete a chore",
            Self::UnassignedChores => "Unassigned chores",
            Self::AssignChore => "Assign chore to roommate",
            Self::Exit => "Exit",
        }
    }

    /// Maps a one-based menu number to its option.
    fn from_number(number: usize) -> Option<Self> {
        number.checked_sub(1).and_then(|index| MENU.get(index).copied())
    }
}

#[derive(Debug)]
enum ShellError {
    Io(io::Error),
    Repo(RepoError),
    EndOfInput,
}

impl From<io::Error> for ShellError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for ShellError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

type ShellResult<T> = Result<T, ShellError>;

/// Text front end driving room, chore and roommate repositories.
pub struct Shell<R, C, M> {
    rooms: R,
    chores: C,
    roommates: M,
}

impl<R, C, M> Shell<R, C, M>
where
    R: RoomRepository,
    C: ChoreRepository,
    M: RoommateRepository,
{
    pub fn new(rooms: R, chores: C, roommates: M) -> Self {
        Self {
            rooms,
            chores,
            roommates,
        }
    }

    /// Runs the menu until `Exit` or end of input.
    pub fn run(&self, input: &mut impl BufRead, output: &mut impl Write) -> io::Result<()> {
        loop {
            write_menu(output)?;
            let option = match read_selection(input, output) {
                Ok(option) => option,
                Err(ShellError::Io(err)) => return Err(err),
                Err(_) => return Ok(()),
            };
            if option == MenuOption::Exit {
                return Ok(());
            }

            match self.dispatch(option, input, output) {
                Ok(()) => {}
                Err(ShellError::Repo(err)) => {
                    warn!(
                        "event=shell_action module=cli status=error action={:?} error={}",
                        option, err
                    );
                    writeln!(output, "Error: {err}")?;
                }
                Err(ShellError::Io(err)) => return Err(err),
                Err(ShellError::EndOfInput) => return Ok(()),
            }
            writeln!(output)?;
        }
    }

    fn dispatch(
        &self,
        option: MenuOption,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> ShellResult<()> {
        match option {
            MenuOption::ShowRooms => {
                let rooms = self.rooms.get_all()?;
                if rooms.is_empty() {
                    writeln!(output, "No rooms yet.")?;
                }
                for room in rooms {
                    writeln!(
                        output,
                        "{} has an Id of {} and a max occupancy of {}",
                        room.name, room.id, room.max_occupancy
                    )?;
                }
            }
            MenuOption::ShowChores => {
                let chores = self.chores.get_all()?;
                write_chores(output, &chores)?;
            }
            MenuOption::SearchRoom => {
                let id: i64 = prompt_parsed(input, output, "Room Id: ")?;
                let room = self.rooms.get_by_id(RoomId(id))?;
                writeln!(
                    output,
                    "{} - {} Max Occupancy({})",
                    room.id, room.name, room.max_occupancy
                )?;
            }
            MenuOption::SearchRoommate => {
                self.list_roommates(output)?;
                let id: i64 = prompt_parsed(input, output, "Enter roommate number: ")?;
                let detail = self.roommates.get_by_id(RoommateId(id))?;
                writeln!(
                    output,
                    "{}'s rent portion is {} for the {} (moved in {})",
                    detail.roommate.first_name,
                    detail.roommate.rent_portion,
                    detail.room_name,
                    detail.roommate.move_in_date
                )?;
            }
            MenuOption::SearchChore => {
                let id: i64 = prompt_parsed(input, output, "Chore Id: ")?;
                let chore = self.chores.get_by_id(ChoreId(id))?;
                writeln!(output, "Chore {} is: {}", chore.id, chore.name)?;
            }
            MenuOption::AddRoom => {
                let name = prompt(input, output, "Room name: ")?;
                let max_occupancy: i64 = prompt_parsed(input, output, "Max occupancy: ")?;
                let mut room = Room::new(name, max_occupancy);
                self.rooms.insert(&mut room)?;
                writeln!(
                    output,
                    "{} has been added and assigned an Id of {}",
                    room.name, room.id
                )?;
            }
            MenuOption::AddChore => {
                let name = prompt(input, output, "Chore name: ")?;
                let mut chore = Chore::new(name);
                self.chores.insert(&mut chore)?;
                writeln!(
                    output,
                    "{} has been added and assigned an Id of {}",
                    chore.name, chore.id
                )?;
            }
            MenuOption::UpdateChore => {
                write_chores(output, &self.chores.get_all()?)?;
                let id: i64 = prompt_parsed(input, output, "Chore Id: ")?;
                // Update itself is silent on missing rows; check first so the
                // operator is told.
                let mut chore = self.chores.get_by_id(ChoreId(id))?;
                chore.name = prompt(input, output, "New name: ")?;
                self.chores.update(&chore)?;
                writeln!(output, "Chore {} is now: {}", chore.id, chore.name)?;
            }
            MenuOption::DeleteChore => {
                write_chores(output, &self.chores.get_all()?)?;
                let id: i64 = prompt_parsed(input, output, "Chore Id: ")?;
                self.chores.delete(ChoreId(id))?;
                writeln!(output, "Chore {id} deleted.")?;
            }
            MenuOption::UnassignedChores => {
                writeln!(output, "Unassigned chores")?;
                let chores = self.chores.get_unassigned_chores()?;
                write_chores(output, &chores)?;
            }
            MenuOption::AssignChore => {
                write_chores(output, &self.chores.get_all()?)?;
                let chore_id = ChoreId(prompt_parsed(input, output, "Enter chore number: ")?);
                self.list_roommates(output)?;
                let roommate_id =
                    RoommateId(prompt_parsed(input, output, "Enter roommate number: ")?);
                self.chores.assign_chore(chore_id, roommate_id)?;
                writeln!(
                    output,
                    "Chore {chore_id} assigned to roommate {roommate_id}."
                )?;
            }
            MenuOption::Exit => {}
        }
        Ok(())
    }

    fn list_roommates(&self, output: &mut impl Write) -> ShellResult<()> {
        for roommate in self.roommates.get_all()? {
            writeln!(output, "{} : {}", roommate.id, roommate.full_name())?;
        }
        Ok(())
    }
}

fn write_menu(output: &mut impl Write) -> io::Result<()> {
    for (index, option) in MENU.iter().enumerate() {
        writeln!(output, "{}. {}", index + 1, option.label())?;
    }
    Ok(())
}

fn write_chores(output: &mut impl Write, chores: &[Chore]) -> io::Result<()> {
    if chores.is_empty() {
        writeln!(output, "No chores.")?;
    }
    for chore in chores {
        writeln!(output, "Chore {} is: {}", chore.id, chore.name)?;
    }
    Ok(())
}

fn read_selection(input: &mut impl BufRead, output: &mut impl Write) -> ShellResult<MenuOption> {
    loop {
        let line = prompt(input, output, "\nSelect an option > ")?;
        if let Some(option) = line.parse().ok().and_then(MenuOption::from_number) {
            return Ok(option);
        }
    }
}

fn prompt(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> ShellResult<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ShellError::EndOfInput);
    }
    Ok(line.trim().to_string())
}

/// Prompts until the answer parses as `T`.
fn prompt_parsed<T: FromStr>(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
) -> ShellResult<T> {
    loop {
        let line = prompt(input, output, label)?;
        match line.parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "`{line}` is not a valid number.")?,
        }
    }
}
